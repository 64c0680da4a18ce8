use docsign_core::application::{
    AuditObserver, CoordinatorContext, CoordinatorOptions, LoadState, SealSearchConfig, SignatureCoordinator, ViewerKind,
};
use docsign_core::domain::{DocumentKey, DocumentType, OrganizationSettings, SignerRole};
use docsign_core::foundation::util::encoding::encode_base64;
use docsign_core::foundation::{now_nanos, DocumentId, SignatureError, SignatureId};
use docsign_core::infrastructure::audit::{
    audit, init_audit_logger, AuditEvent, FileAuditLogger, MultiAuditLogger, StructuredAuditLogger,
};
use docsign_core::infrastructure::config::{load_app_config_from_path, resolve_config_path, resolve_data_dir, AppConfig};
use docsign_core::infrastructure::logging::init_logger;
use docsign_core::infrastructure::session::{AuthSession, StaticSessionProvider};
use docsign_core::infrastructure::storage::{DocumentStore, RocksStore};
use std::path::{Path, PathBuf};
use std::sync::Arc;

const DEFAULT_OPERATOR: &str = "signature-admin";

struct Args {
    config: Option<PathBuf>,
    data_dir: Option<PathBuf>,
    user: String,
    cmd: Command,
}

enum Command {
    Status { key: DocumentKey, viewer: ViewerKind },
    Sign { key: DocumentKey, role: SignerRole, image: PathBuf },
    SetSeal { url: Option<String>, path: Option<String>, name: Option<String> },
    Revoke { document_id: DocumentId, signature_id: SignatureId },
    List { key: DocumentKey },
}

#[tokio::main]
async fn main() -> Result<(), SignatureError> {
    let args = parse_args()?;

    let data_dir = match args.data_dir.clone() {
        Some(dir) => dir,
        None => resolve_data_dir()?,
    };
    let config_path = args.config.clone().unwrap_or_else(|| resolve_config_path(&data_dir));
    let config = load_app_config_from_path(&config_path, &data_dir)?;
    init_logger(config.service.log_dir.as_deref(), &config.service.log_filters)?;
    init_audit(&config)?;

    let store = Arc::new(RocksStore::open_in_dir(&config.service.data_dir, config.storage.public_base_url.clone())?);
    let sessions = Arc::new(StaticSessionProvider::signed_in(AuthSession::new(args.user.as_str())));
    let context = CoordinatorContext::from_store(store.clone(), sessions, SealSearchConfig::from_app_config(&config))
        .with_observer(Arc::new(AuditObserver));
    let options = CoordinatorOptions::from_app_config(&config);

    match args.cmd {
        Command::Status { key, viewer } => {
            let mut coordinator = SignatureCoordinator::open(key, viewer, context, options).await?;
            if coordinator.state() == LoadState::Unloaded {
                coordinator.reload().await;
            }
            print_status(&coordinator);
            Ok(())
        }
        Command::Sign { key, role, image } => {
            let image_data = read_image_as_data_url(&image)?;
            let mut coordinator = SignatureCoordinator::open(key, ViewerKind::Crm, context, options).await?;
            let url = coordinator.save_signature(&image_data, role).await?;
            println!("signed role={} url={}", role, url);
            print_status(&coordinator);
            Ok(())
        }
        Command::SetSeal { url, path, name } => {
            let mut settings = store.organization_settings().await?.unwrap_or_default();
            if url.is_some() || path.is_some() {
                settings.seal_url = url;
                settings.seal_path = path;
            }
            if name.is_some() {
                settings.organization_name = name;
            }
            store.put_organization_settings(settings.clone()).await?;
            print_settings(&settings);
            Ok(())
        }
        Command::Revoke { document_id, signature_id } => {
            let Some(document) = store.get_document(&document_id).await? else {
                return Err(SignatureError::Message(format!("unknown document {}", document_id)));
            };
            if !store.delete_signature(&document_id, &signature_id).await? {
                return Err(SignatureError::Message(format!("no signature {} on document {}", signature_id, document_id)));
            }
            audit(AuditEvent::SignatureRevoked {
                document_id: document_id.to_string(),
                signature_id: signature_id.to_string(),
                timestamp_ns: now_nanos(),
            });
            println!("revoked signature={} document={} ({})", signature_id, document.id, document.title);
            Ok(())
        }
        Command::List { key } => {
            let Some(document) = store.find_document(&key).await? else {
                println!("no document for {}", key);
                return Ok(());
            };
            println!("document {} ({})", document.id, document.title);
            for record in store.list_signatures(&document.id).await? {
                println!(
                    "  {} role={} at={} by={} url={}",
                    record.id, record.role, record.created_at_nanos, record.created_by, record.image_url
                );
            }
            Ok(())
        }
    }
}

fn init_audit(config: &AppConfig) -> Result<(), SignatureError> {
    let mut loggers = MultiAuditLogger::new();
    loggers.add_logger(Box::new(StructuredAuditLogger));
    if let Some(path) = config.audit.log_path.as_deref().map(str::trim).filter(|path| !path.is_empty()) {
        loggers.add_logger(Box::new(FileAuditLogger::new(Path::new(path))?));
    }
    init_audit_logger(Box::new(loggers));
    Ok(())
}

fn print_status(coordinator: &SignatureCoordinator) {
    let document = coordinator.document();
    println!("document {} ({}) state={:?}", document.id, document.title, coordinator.state());
    println!("status: {}", coordinator.signature_status_message());
    for (role, url) in coordinator.signatures().slots() {
        if !coordinator.requirements().permits(role) {
            continue;
        }
        let permission = coordinator.can_sign(role);
        let marker = if coordinator.requirements().is_required(role) { "required" } else { "optional" };
        let can_sign = match permission.reason {
            None => "can sign".to_string(),
            Some(reason) => reason,
        };
        println!("  {:<18} {:<8} {:<45} {}", role, marker, url.unwrap_or("signature pending"), can_sign);
    }
}

fn print_settings(settings: &OrganizationSettings) {
    println!("organization_name={}", settings.organization_name.as_deref().unwrap_or("-"));
    println!("seal_url={}", settings.seal_url.as_deref().unwrap_or("-"));
    println!("seal_path={}", settings.seal_path.as_deref().unwrap_or("-"));
}

fn read_image_as_data_url(path: &Path) -> Result<String, SignatureError> {
    let bytes = std::fs::read(path)?;
    let mime = if bytes.starts_with(&[0x89, b'P', b'N', b'G']) {
        "image/png"
    } else if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        "image/jpeg"
    } else {
        return Err(SignatureError::invalid_payload(format!("{} is neither PNG nor JPEG", path.display())));
    };
    Ok(format!("data:{};base64,{}", mime, encode_base64(&bytes)))
}

fn print_usage() {
    eprintln!(
        "Usage:\n\
  signature-admin [--config PATH] [--data-dir DIR] [--user ID] <command> [command-args]\n\
\n\
Global options:\n\
  --config PATH     Config file (default: DOCSIGN_CONFIG_PATH or <data-dir>/docsign.toml)\n\
  --data-dir DIR    Data directory (default: DOCSIGN_DATA_DIR or ./.docsign)\n\
  --user ID         Operator recorded as signer (default: signature-admin)\n\
\n\
Commands:\n\
  status <type> <training> <participant> [--viewer crm|student|readonly]\n\
  sign <type> <training> <participant> <role> <image.png|image.jpg>\n\
  set-seal [--url URL] [--path PATH] [--name NAME]\n\
  revoke <document-id> <signature-id>\n\
  list <type> <training> <participant>\n"
    );
}

fn missing(what: &str) -> SignatureError {
    SignatureError::Message(format!("missing {}", what))
}

fn parse_key(it: &mut impl Iterator<Item = String>) -> Result<DocumentKey, SignatureError> {
    let document_type: DocumentType = it.next().ok_or_else(|| missing("<type>"))?.parse()?;
    let training_id = it.next().ok_or_else(|| missing("<training>"))?.parse()?;
    let participant_id = it.next().ok_or_else(|| missing("<participant>"))?.parse()?;
    Ok(DocumentKey { document_type, training_id, participant_id })
}

fn parse_args() -> Result<Args, SignatureError> {
    let mut config = None;
    let mut data_dir = None;
    let mut user = DEFAULT_OPERATOR.to_string();

    let mut it = std::env::args().skip(1).peekable();
    while let Some(arg) = it.next_if(|arg| arg.starts_with('-')) {
        match arg.as_str() {
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            "--config" => config = Some(PathBuf::from(it.next().ok_or_else(|| missing("--config value"))?)),
            "--data-dir" => data_dir = Some(PathBuf::from(it.next().ok_or_else(|| missing("--data-dir value"))?)),
            "--user" => user = it.next().ok_or_else(|| missing("--user value"))?,
            _ => return Err(SignatureError::Message(format!("unknown option: {}", arg))),
        }
    }

    let cmd = it.next().ok_or_else(|| {
        print_usage();
        missing("command")
    })?;

    let cmd = match cmd.as_str() {
        "status" => {
            let key = parse_key(&mut it)?;
            let mut viewer = ViewerKind::Crm;
            while let Some(flag) = it.next() {
                match flag.as_str() {
                    "--viewer" => {
                        viewer = match it.next().ok_or_else(|| missing("--viewer value"))?.to_ascii_lowercase().as_str() {
                            "crm" => ViewerKind::Crm,
                            "student" => ViewerKind::Student,
                            "readonly" => ViewerKind::ReadOnly,
                            other => {
                                return Err(SignatureError::Message(format!(
                                    "invalid --viewer value: {} (expected crm|student|readonly)",
                                    other
                                )))
                            }
                        }
                    }
                    _ => return Err(SignatureError::Message(format!("unknown status option: {}", flag))),
                }
            }
            Command::Status { key, viewer }
        }
        "sign" => {
            let key = parse_key(&mut it)?;
            let role: SignerRole = it.next().ok_or_else(|| missing("<role>"))?.parse()?;
            let image = PathBuf::from(it.next().ok_or_else(|| missing("<image>"))?);
            Command::Sign { key, role, image }
        }
        "set-seal" => {
            let (mut url, mut path, mut name) = (None, None, None);
            while let Some(flag) = it.next() {
                let value = it.next().ok_or_else(|| missing(&format!("{} value", flag)))?;
                match flag.as_str() {
                    "--url" => url = Some(value),
                    "--path" => path = Some(value),
                    "--name" => name = Some(value),
                    _ => return Err(SignatureError::Message(format!("unknown set-seal option: {}", flag))),
                }
            }
            Command::SetSeal { url, path, name }
        }
        "revoke" => {
            let document_id = it.next().ok_or_else(|| missing("<document-id>"))?.parse()?;
            let signature_id = it.next().ok_or_else(|| missing("<signature-id>"))?.parse()?;
            Command::Revoke { document_id, signature_id }
        }
        "list" => Command::List { key: parse_key(&mut it)? },
        other => {
            print_usage();
            return Err(SignatureError::Message(format!("unknown command: {}", other)));
        }
    };

    Ok(Args { config, data_dir, user, cmd })
}
