use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use eyre::Result;

use prakriti_core::models::assessment::AssessmentRecord;
use prakriti_core::models::patient::NewPatient;
use prakriti_core::models::user::{Role, User};
use prakriti_app::answers::AnswerFile;
use prakriti_app::config::{bootstrap_config, load_config, save_config, set_config_value};
use prakriti_app::paths::AppPaths;
use prakriti_app::pipeline::{Artifacts, ReportOptions, assess, write_artifacts};
use prakriti_storage::users::PasswordReset;
use prakriti_storage::{Database, export_bytes};

#[derive(Parser)]
#[command(name = "prakriti", version)]
#[command(about = "Ayurvedic constitution assessment and branded reports")]
struct Cli {
    /// Application directory (default ~/.ayurprakriti_app)
    #[arg(long, global = true, env = "PRAKRITI_APP_DIR")]
    app_dir: Option<PathBuf>,

    #[arg(long, global = true, env = "PRAKRITI_USERNAME")]
    username: Option<String>,

    #[arg(long, global = true, env = "PRAKRITI_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create the app directory, default config and database
    Init,
    #[command(subcommand)]
    Patient(PatientCommand),
    /// Score an answer file for a patient and save the assessment
    Assess {
        #[arg(long)]
        patient_id: i64,
        /// YAML or JSON file with prakriti/vikriti/psychometric sections
        #[arg(long)]
        answers: PathBuf,
        /// Name recorded as the assessor (defaults to the logged-in user)
        #[arg(long)]
        assessor: Option<String>,
        #[command(flatten)]
        docs: DocumentArgs,
    },
    #[command(subcommand)]
    Assessment(AssessmentCommand),
    /// Generate documents for a saved assessment
    Report {
        id: i64,
        #[command(flatten)]
        docs: DocumentArgs,
    },
    #[command(subcommand)]
    User(UserCommand),
    #[command(subcommand)]
    Config(ConfigCommand),
    #[command(subcommand)]
    Db(DbCommand),
    #[command(subcommand)]
    Tmp(TmpCommand),
}

#[derive(Subcommand)]
enum PatientCommand {
    /// Register a patient
    Add {
        #[arg(long)]
        name: String,
        #[arg(long, default_value_t = 30)]
        age: u32,
        #[arg(long, default_value = "Other")]
        gender: String,
        #[arg(long, default_value = "")]
        contact: String,
    },
    /// List patients, newest first
    List,
}

#[derive(Subcommand)]
enum AssessmentCommand {
    /// List assessments, newest first
    List {
        #[arg(long)]
        patient_id: Option<i64>,
    },
    /// Print one assessment as JSON
    Show { id: i64 },
}

#[derive(Subcommand)]
enum UserCommand {
    /// Create a user (admin only)
    Add {
        #[arg(long = "new-username")]
        new_username: String,
        #[arg(long, default_value = "")]
        display_name: String,
        #[arg(long = "new-password")]
        new_password: String,
        #[arg(long, default_value = "clinician")]
        role: Role,
    },
    /// Set a password, creating an admin account if the user is missing
    ResetPassword {
        #[arg(long, default_value = "admin")]
        target: String,
        #[arg(long = "new-password")]
        new_password: String,
    },
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Print the active config as YAML
    Show,
    /// Set a dotted key, e.g. `branding.clinic_name "Kakunje Wellness"` (admin only)
    Set { key: String, value: String },
}

#[derive(Subcommand)]
enum DbCommand {
    /// Copy the database file (admin only)
    Export {
        #[arg(long)]
        out: PathBuf,
    },
}

#[derive(Subcommand)]
enum TmpCommand {
    /// Remove temporary chart files
    Clean,
}

#[derive(Args, Debug, Clone, Default)]
struct DocumentArgs {
    /// Branded PDF report
    #[arg(long)]
    pdf: bool,
    /// DOCX report
    #[arg(long)]
    docx: bool,
    /// One-page action plan PDF
    #[arg(long)]
    action_plan: bool,
    /// Follow-up calendar file
    #[arg(long)]
    ics: bool,
    /// Include the practical appendix in the PDF
    #[arg(long)]
    appendix: bool,
    /// Clinician-neutral phrasing
    #[arg(long)]
    neutral_tone: bool,
    #[arg(long)]
    doctor_note: Option<String>,
    #[arg(long)]
    followup_days: Option<i64>,
    /// Output directory (default: the app's reports directory)
    #[arg(long)]
    out: Option<PathBuf>,
}

impl DocumentArgs {
    fn options(&self) -> ReportOptions {
        ReportOptions {
            pdf: self.pdf,
            docx: self.docx,
            action_plan: self.action_plan,
            ics: self.ics,
            appendix: self.appendix,
            neutral_tone: self.neutral_tone,
            doctor_note: self.doctor_note.clone(),
            followup_days: self.followup_days,
        }
    }
}

struct Session {
    paths: AppPaths,
    db: Database,
    username: Option<String>,
    password: Option<String>,
}

impl Session {
    fn open(paths: AppPaths, username: Option<String>, password: Option<String>) -> Result<Self> {
        paths.ensure()?;
        bootstrap_config(&paths.config)?;
        let db = Database::open(&paths.db)?;
        Ok(Self {
            paths,
            db,
            username,
            password,
        })
    }

    fn login(&self) -> Result<User> {
        let (Some(username), Some(password)) = (&self.username, &self.password) else {
            return Err(eyre::eyre!("this command needs --username and --password"));
        };
        self.db
            .authenticate(username, password)?
            .ok_or_else(|| eyre::eyre!("invalid username or password"))
    }

    fn login_admin(&self) -> Result<User> {
        let user = self.login()?;
        if !user.role.is_admin() {
            return Err(eyre::eyre!("user '{}' is not an admin", user.username));
        }
        Ok(user)
    }
}

fn print_artifacts(artifacts: &Artifacts) {
    if let Some((_, engine)) = &artifacts.pdf {
        println!("PDF engine: {engine:?}");
    }
    for path in artifacts.paths() {
        println!("{}", path.display());
    }
}

fn documents(session: &Session, id: i64, record: AssessmentRecord, docs: &DocumentArgs) -> Result<()> {
    let options = docs.options();
    if !options.any() {
        return Ok(());
    }
    let config = load_config(&session.paths.config)?;
    let out_dir = docs.out.clone().unwrap_or_else(|| session.paths.reports.clone());
    let now = jiff::Zoned::now();
    let artifacts = write_artifacts(
        &config,
        id,
        record,
        &options,
        &out_dir,
        &session.paths.tmp,
        &now,
    )?;
    print_artifacts(&artifacts);
    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    let paths = AppPaths::resolve(cli.app_dir.as_deref())?;
    let session = Session::open(paths, cli.username, cli.password)?;

    match cli.command {
        Command::Init => {
            println!("App directory: {}", session.paths.root.display());
            println!("Config: {}", session.paths.config.display());
            println!("Database: {}", session.paths.db.display());
        }
        Command::Patient(PatientCommand::Add {
            name,
            age,
            gender,
            contact,
        }) => {
            session.login()?;
            let patient = session.db.create_patient(&NewPatient {
                name,
                age,
                gender,
                contact,
            })?;
            println!("Patient {} registered: {}", patient.id, patient.name);
        }
        Command::Patient(PatientCommand::List) => {
            session.login()?;
            for p in session.db.list_patients()? {
                println!("{}\t{}\t{}\t{}\t{}", p.id, p.name, p.age, p.gender, p.created_at);
            }
        }
        Command::Assess {
            patient_id,
            answers,
            assessor,
            docs,
        } => {
            let user = session.login()?;
            let config = load_config(&session.paths.config)?;
            let patient = session.db.get_patient(patient_id)?;
            let answers = AnswerFile::load(&answers)?;
            let record = assess(&config, &patient, &answers, jiff::Timestamp::now())?;
            let assessor = assessor.unwrap_or(user.display_name);
            let id = session.db.save_assessment(patient_id, &assessor, &record)?;
            println!(
                "Assessment {id} saved. Prakriti {} / Vikriti {}",
                record.prakriti_pct.dominant(),
                record.vikriti_pct.dominant()
            );
            documents(&session, id, record, &docs)?;
        }
        Command::Assessment(AssessmentCommand::List { patient_id }) => {
            session.login()?;
            for a in session.db.list_assessments(patient_id)? {
                println!("{}\t{}\t{}\t{}", a.id, a.patient_id, a.assessor, a.created_at);
            }
        }
        Command::Assessment(AssessmentCommand::Show { id }) => {
            session.login()?;
            let assessment = session.db.get_assessment(id)?;
            println!("{}", serde_json::to_string_pretty(&assessment)?);
        }
        Command::Report { id, docs } => {
            session.login()?;
            let assessment = session.db.get_assessment(id)?;
            if !docs.options().any() {
                return Err(eyre::eyre!("choose at least one of --pdf, --docx, --action-plan, --ics"));
            }
            documents(&session, id, assessment.data, &docs)?;
        }
        Command::User(UserCommand::Add {
            new_username,
            display_name,
            new_password,
            role,
        }) => {
            session.login_admin()?;
            let user = session
                .db
                .create_user(&new_username, &display_name, &new_password, role)?;
            println!("User '{}' created ({})", user.username, user.role);
        }
        Command::User(UserCommand::ResetPassword { target, new_password }) => {
            match session.db.reset_password(&target, &new_password)? {
                PasswordReset::Updated => println!("Password updated for '{target}'"),
                PasswordReset::CreatedAdmin => println!("Admin account '{target}' created"),
            }
        }
        Command::Config(ConfigCommand::Show) => {
            let config = load_config(&session.paths.config)?;
            print!("{}", serde_yaml::to_string(&config)?);
        }
        Command::Config(ConfigCommand::Set { key, value }) => {
            session.login_admin()?;
            let config = load_config(&session.paths.config)?;
            let updated = set_config_value(&config, &key, &value)?;
            save_config(&session.paths.config, &updated)?;
            println!("{key} updated");
        }
        Command::Db(DbCommand::Export { out }) => {
            session.login_admin()?;
            copy_database(&session.paths.db, &out)?;
            println!("{}", out.display());
        }
        Command::Tmp(TmpCommand::Clean) => {
            let removed = session.paths.clean_tmp();
            println!("Removed {removed} temp files");
        }
    }
    Ok(())
}

fn copy_database(db: &Path, out: &Path) -> Result<()> {
    let bytes = export_bytes(db)?;
    if let Some(dir) = out.parent()
        && !dir.as_os_str().is_empty()
    {
        fs::create_dir_all(dir)?;
    }
    fs::write(out, bytes)?;
    tracing::info!(path = %out.display(), "database exported");
    Ok(())
}

fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    run(Cli::parse())
}
