use chrono::Utc;
use clap::{Parser, Subcommand};
use dialoguer::Confirm;
use dotenvy::dotenv;
use rollcall_auth::{create_access_token, permissions};
use rollcall_cli::seeder::{self, ClassesPerSchool, SeedConfig};
use rollcall_config::JwtConfig;
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "rollcall-cli")]
#[command(about = "Rollcall CLI - Administrative tools for Rollcall", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Seed the database with fake schools, students, holidays and attendance
    Seed {
        /// Number of schools to create
        #[arg(short = 's', long, default_value = "1")]
        schools: usize,

        /// Number of classes per school
        #[arg(long, default_value = "5")]
        classes: usize,

        /// Number of sections per class
        #[arg(long, default_value = "2")]
        sections: usize,

        /// Number of students per section
        #[arg(long, default_value = "25")]
        students: usize,

        /// Number of past working days to mark
        #[arg(short = 'd', long, default_value = "30")]
        days: usize,
    },
    /// Print a signed access token scoped to a school
    IssueToken {
        /// School the token is scoped to
        #[arg(long)]
        school_id: Uuid,

        /// Email address embedded in the token
        #[arg(short = 'e', long)]
        email: String,

        /// Subject of the token (a new id when omitted)
        #[arg(long)]
        user_id: Option<Uuid>,

        /// Permissions to grant (all when omitted)
        #[arg(short = 'p', long = "permission")]
        permissions: Vec<String>,
    },
    /// Clear all seeded data (deletes every school)
    ClearSeed {
        /// Skip the confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Seed {
            schools,
            classes,
            sections,
            students,
            days,
        } => handle_seed(schools, classes, sections, students, days).await,
        Commands::IssueToken {
            school_id,
            email,
            user_id,
            permissions,
        } => handle_issue_token(school_id, &email, user_id, permissions),
        Commands::ClearSeed { yes } => handle_clear_seed(yes).await,
    }
}

async fn handle_seed(
    schools: usize,
    classes: usize,
    sections: usize,
    students: usize,
    days: usize,
) {
    let pool = rollcall_db::init_db_pool().await;
    let config = SeedConfig::new(schools)
        .with_classes(ClassesPerSchool {
            count: classes,
            sections_per_class: sections,
            students_per_section: students,
        })
        .with_days(days);

    if let Err(e) = seeder::seed_all(&pool, config, Utc::now().date_naive()).await {
        eprintln!("\n❌ Error seeding database: {}", e);
        std::process::exit(1);
    }
}

fn handle_issue_token(
    school_id: Uuid,
    email: &str,
    user_id: Option<Uuid>,
    requested: Vec<String>,
) {
    let granted = if requested.is_empty() {
        permissions::ALL.iter().map(|p| p.to_string()).collect()
    } else {
        if let Some(unknown) = requested
            .iter()
            .find(|p| !permissions::ALL.contains(&p.as_str()))
        {
            eprintln!("❌ Unknown permission: {}", unknown);
            eprintln!("   Known permissions: {}", permissions::ALL.join(", "));
            std::process::exit(1);
        }
        requested
    };

    let jwt_config = JwtConfig::from_env();
    let user_id = user_id.unwrap_or_else(Uuid::new_v4);

    match create_access_token(user_id, email, Some(school_id), granted, &jwt_config) {
        Ok(token) => println!("{}", token),
        Err(e) => {
            eprintln!("❌ Error creating token: {}", e.error);
            std::process::exit(1);
        }
    }
}

async fn handle_clear_seed(yes: bool) {
    let confirmed = yes
        || Confirm::new()
            .with_prompt("This deletes every school and all of its data. Continue?")
            .default(false)
            .interact()
            .unwrap_or(false);

    if !confirmed {
        println!("Aborted");
        return;
    }

    let pool = rollcall_db::init_db_pool().await;
    if let Err(e) = seeder::clear_all(&pool).await {
        eprintln!("\n❌ Error clearing seeded data: {}", e);
        std::process::exit(1);
    }
}
