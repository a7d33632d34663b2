use std::sync::Arc;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use patient_core::wire::PatientRequest;
use patient_core::{CoreConfig, DatabaseLocation, PatientService};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "patients")]
#[command(about = "Patient registry administration CLI")]
struct Cli {
    /// SQLite database file, or `:memory:` (defaults to PATIENT_DB_PATH, then patients.db)
    #[arg(long, global = true)]
    db: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a patient
    Create {
        /// Ten character national id
        national_id: String,
        /// First name
        first_name: String,
        /// Blood type, e.g. O+
        blood_type: String,
        #[arg(long)]
        last_name: Option<String>,
        /// Date of birth (YYYY-MM-DD)
        #[arg(long)]
        birth_date: Option<NaiveDate>,
    },
    /// Show one patient
    Get {
        national_id: String,
    },
    /// List all patients
    List,
    /// Update the given fields of a patient
    Update {
        national_id: String,
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
        /// Date of birth (YYYY-MM-DD)
        #[arg(long)]
        birth_date: Option<NaiveDate>,
        #[arg(long)]
        blood_type: Option<String>,
    },
    /// Delete a patient
    Delete {
        national_id: String,
    },
}

fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        println!("Use 'patients --help' for commands");
        return Ok(());
    };

    let db = cli.db.or_else(|| std::env::var("PATIENT_DB_PATH").ok());
    let cfg = CoreConfig::new(DatabaseLocation::from_env_value(db))?;
    let service = PatientService::new(Arc::new(cfg.open_store()?));

    match command {
        Commands::Create {
            national_id,
            first_name,
            blood_type,
            last_name,
            birth_date,
        } => print_json(&service.create_patient(PatientRequest {
            national_id: Some(national_id),
            first_name: Some(first_name),
            last_name,
            birth_date,
            blood_type: Some(blood_type),
        })),
        Commands::Get { national_id } => {
            print_json(&service.get_patient_by_national_id(&national_id))
        }
        Commands::List => print_json(&service.get_all_patients()),
        Commands::Update {
            national_id,
            first_name,
            last_name,
            birth_date,
            blood_type,
        } => print_json(&service.update_patient(
            &national_id,
            PatientRequest {
                national_id: None,
                first_name,
                last_name,
                birth_date,
                blood_type,
            },
        )),
        Commands::Delete { national_id } => print_json(&service.delete_patient(&national_id)),
    }
}
