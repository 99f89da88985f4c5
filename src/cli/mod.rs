//! `registrar` command-line front end.
//!
//! Every subcommand drives the same [`StudentScreen`] a graphical front end
//! would, then prints the notices it collected.

pub mod display;
pub mod prompts;

use anyhow::Result;
use clap::{Parser, Subcommand};
use dialoguer::Confirm;
use registrar_client::{HttpStudentApi, StudentApi};
use registrar_config::{ApiConfig, ScreenConfig};
use registrar_core::notice::Notice;
use registrar_form::StudentScreen;
use registrar_models::{Role, StatusDecision, StudentId};

#[derive(Parser)]
#[command(name = "registrar")]
#[command(about = "Registrar - Student registration admin client", long_about = None)]
pub struct Cli {
    /// Backend base URL (overrides REGISTRAR_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Active role: user, staff or registrar
    #[arg(short = 'r', long, global = true, default_value = "registrar")]
    pub role: Role,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List students
    List {
        /// Page number
        #[arg(short = 'p', long, default_value = "1")]
        page: usize,

        /// Rows per page (5, 10, 20 or 50)
        #[arg(long)]
        per_page: Option<usize>,

        /// Filter by first or last name
        #[arg(short = 's', long)]
        search: Option<String>,
    },
    /// List the countries offered as nationalities
    Countries,
    /// Show one student with its family members
    Show { id: String },
    /// Register a new student interactively
    Create,
    /// Edit an existing student interactively
    Edit { id: String },
    /// Delete a student
    Delete {
        id: String,

        /// Skip the confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
    /// Accept a pending student
    Accept { id: String },
    /// Reject a pending student
    Reject { id: String },
}

pub async fn run(cli: Cli) -> Result<()> {
    let mut api_config = ApiConfig::from_env();
    if let Some(url) = cli.api_url {
        api_config = api_config.with_base_url(url);
    }

    let api = HttpStudentApi::new(&api_config)?;
    let mut screen = StudentScreen::new(api, ScreenConfig::from_env(), cli.role);
    screen.activate().await;
    print_notices(screen.take_notices());

    let result = execute(&mut screen, cli.command).await;
    print_notices(screen.take_notices());
    result
}

async fn execute<A: StudentApi>(screen: &mut StudentScreen<A>, command: Commands) -> Result<()> {
    match command {
        Commands::List {
            page,
            per_page,
            search,
        } => {
            if let Some(per_page) = per_page {
                screen.set_per_page(per_page);
            }
            if let Some(search) = search {
                screen.set_search(&search);
            }
            screen.set_page(page);
            display::print_students(&screen.table());
        }
        Commands::Countries => display::print_countries(screen.countries().all()),
        Commands::Show { id } => {
            if screen.open_edit(StudentId::new(id)).await {
                display::print_student(screen.form(), screen.countries());
                screen.close_form();
            }
        }
        Commands::Create => {
            if screen.open_create() {
                prompts::edit_session(screen).await?;
            }
        }
        Commands::Edit { id } => {
            if screen.open_edit(StudentId::new(id)).await {
                if screen.form().is_editable() {
                    prompts::edit_session(screen).await?;
                } else {
                    println!("Read-only for the {} role.", screen.role());
                    display::print_student(screen.form(), screen.countries());
                    screen.close_form();
                }
            }
        }
        Commands::Delete { id, yes } => {
            let confirmed = yes
                || Confirm::new()
                    .with_prompt(format!("Delete student {id}?"))
                    .default(false)
                    .interact()?;
            if confirmed {
                screen.delete_student(&StudentId::new(id)).await;
            }
        }
        Commands::Accept { id } => {
            screen
                .change_status(&StudentId::new(id), StatusDecision::Accept)
                .await;
        }
        Commands::Reject { id } => {
            screen
                .change_status(&StudentId::new(id), StatusDecision::Reject)
                .await;
        }
    }
    Ok(())
}

pub(crate) fn print_notices(notices: Vec<Notice>) {
    for notice in notices {
        match notice {
            Notice::Success(message) => println!("✅ {message}"),
            Notice::Failure { message, .. } => eprintln!("❌ {message}"),
        }
    }
}
