use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use serde::Serialize;

use creativeprint::auth_flow::AuthFlow;
use creativeprint::config::{ClientConfig, ConfigError};
use creativeprint::forms::ValidationError;
use creativeprint::forms::password::ChangePasswordForm;
use creativeprint::forms::profile::ProfileForm;
use creativeprint::forms::register::RegisterForm;
use creativeprint::nav::{self, GuardOutcome};
use creativeprint::net::error::ApiError;
use creativeprint::net::http::ApiClient;
use creativeprint::net::types::{FileUpload, LoginRequest, OrderStatus, OrderStatusUpdate, Role, SystemSettings};
use creativeprint::services::Services;
use creativeprint::services::admin::{ProductListQuery, UserListQuery};
use creativeprint::services::orders::OrderListQuery;
use creativeprint::session::{FileStorage, SessionStore};
use creativeprint::state::{self, AppState};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("{0}")]
    Auth(String),
    #[error("not allowed here; redirected to {0}")]
    Redirected(&'static str),
    #[error("failed to read {path}: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "creativeprint", about = "creativePrint storefront API CLI")]
struct Cli {
    /// Overrides `CREATIVEPRINT_API_URL`.
    #[arg(long)]
    api_url: Option<String>,

    /// Overrides `CREATIVEPRINT_SESSION_FILE`.
    #[arg(long)]
    session_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "CREATIVEPRINT_PASSWORD", hide_env_values = true)]
        password: String,
    },
    Register(RegisterCommand),
    Logout,
    Whoami,
    Profile(ProfileCommand),
    Password {
        #[arg(long)]
        current: String,
        #[arg(long)]
        new: String,
        #[arg(long)]
        confirm: String,
    },
    Admin(AdminCommand),
    Partner(PartnerCommand),
}

#[derive(Args, Debug)]
struct AccountArgs {
    #[arg(long)]
    first_name: String,
    #[arg(long)]
    last_name: String,
    #[arg(long)]
    email: String,
    #[arg(long, env = "CREATIVEPRINT_PASSWORD", hide_env_values = true)]
    password: String,
}

#[derive(Args, Debug)]
struct RegisterCommand {
    #[command(subcommand)]
    command: RegisterSubcommand,
}

#[derive(Subcommand, Debug)]
enum RegisterSubcommand {
    Client {
        #[command(flatten)]
        account: AccountArgs,
        #[arg(long, default_value = "")]
        shipping_address: String,
        #[arg(long, default_value = "")]
        billing_address: String,
        #[arg(long, default_value = "")]
        phone_number: String,
    },
    Partner {
        #[command(flatten)]
        account: AccountArgs,
        #[arg(long, default_value = "")]
        company_name: String,
        #[arg(long, default_value = "", help = "MANUFACTURER, SUPPLIER, RETAILER or WHOLESALER")]
        business_type: String,
        #[arg(long, default_value = "")]
        tax_id: String,
        #[arg(long, default_value_t = 0.0)]
        commission_rate: f64,
    },
}

#[derive(Args, Debug)]
struct ProfileCommand {
    #[command(subcommand)]
    command: ProfileSubcommand,
}

#[derive(Subcommand, Debug)]
enum ProfileSubcommand {
    Show,
    Update {
        #[arg(long, default_value = "")]
        first_name: String,
        #[arg(long, default_value = "")]
        last_name: String,
        #[arg(long, default_value = "")]
        email: String,
        #[arg(long, default_value = "")]
        bio: String,
        #[arg(long, default_value = "")]
        website: String,
        #[arg(long = "social-link", help = "Repeat once per link")]
        social_links: Vec<String>,
        #[arg(long)]
        picture: Option<PathBuf>,
    },
}

#[derive(Args, Debug)]
struct AdminCommand {
    #[command(subcommand)]
    command: AdminSubcommand,
}

#[derive(Subcommand, Debug)]
enum AdminSubcommand {
    Stats,
    Users {
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        size: Option<u32>,
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        role: Option<String>,
        #[arg(long)]
        status: Option<String>,
    },
    User {
        user_id: String,
    },
    SetUserStatus {
        user_id: String,
        #[arg(long)]
        active: bool,
    },
    DeleteUser {
        user_id: String,
    },
    Products {
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        size: Option<u32>,
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        category_id: Option<String>,
        #[arg(long)]
        status: Option<String>,
    },
    Product {
        product_id: String,
    },
    Archive {
        product_id: String,
        #[arg(long, default_value_t = false)]
        restore: bool,
    },
    DeleteProduct {
        product_id: String,
    },
    Settings,
    UpdateSettings {
        #[arg(long)]
        data: String,
    },
    Roles,
    Permissions,
    SetPermissions {
        role_id: String,
        #[arg(long = "permission", required = true)]
        permissions: Vec<i64>,
    },
}

#[derive(Args, Debug)]
struct PartnerCommand {
    #[command(subcommand)]
    command: PartnerSubcommand,
}

#[derive(Subcommand, Debug)]
enum PartnerSubcommand {
    Stats,
    Orders {
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        size: Option<u32>,
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        status: Option<OrderStatus>,
    },
    OrderHistory {
        order_id: String,
    },
    UpdateOrder {
        order_id: String,
        /// Status the order is in now.
        #[arg(long)]
        current: OrderStatus,
        #[arg(long)]
        status: OrderStatus,
        #[arg(long)]
        notes: Option<String>,
    },
}

struct CliContext {
    services: Services,
    app: AppState,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let mut config = ClientConfig::from_env()?;
    if let Some(api_url) = cli.api_url.as_deref() {
        config = ClientConfig::new(api_url, config.timeouts, config.session_file)?;
    }
    if let Some(session_file) = cli.session_file {
        config.session_file = session_file;
    }

    let store = SessionStore::new(Arc::new(FileStorage::new(&config.session_file)));
    let api = ApiClient::from_config(&config, store.clone())?;
    let mut ctx = CliContext {
        services: Services::new(&api),
        app: AppState::restore(&store),
    };

    match cli.command {
        Command::Login { email, password } => run_login(&mut ctx, email, password).await,
        Command::Register(register) => run_register(&mut ctx, register).await,
        Command::Logout => run_logout(&mut ctx).await,
        Command::Whoami => {
            let user = state::user::fetch_current_user(&mut ctx.app, &ctx.services.auth).await?;
            print_json(&user)
        }
        Command::Profile(profile) => run_profile(&mut ctx, profile).await,
        Command::Password { current, new, confirm } => {
            let form = ChangePasswordForm {
                current_password: current,
                new_password: new,
                confirm_new_password: confirm,
            };
            state::user::change_password(&mut ctx.app, &form)?;
            Ok(())
        }
        Command::Admin(admin) => run_admin(&ctx, admin).await,
        Command::Partner(partner) => run_partner(&ctx, partner).await,
    }
}

fn navigate(path: &str) {
    tracing::info!(path, "navigate");
}

async fn run_login(ctx: &mut CliContext, email: String, password: String) -> Result<(), CliError> {
    let mut flow = AuthFlow::new(ctx.services.auth.clone(), navigate);
    let credentials = LoginRequest { email, password };
    match flow.login(&mut ctx.app, &credentials).await {
        Some(session) => print_json(&session),
        None => Err(auth_error(flow.state().error.clone())),
    }
}

async fn run_register(ctx: &mut CliContext, register: RegisterCommand) -> Result<(), CliError> {
    let form = match register.command {
        RegisterSubcommand::Client { account, shipping_address, billing_address, phone_number } => RegisterForm {
            shipping_address,
            billing_address,
            phone_number,
            ..account_form(Role::Client, account)
        },
        RegisterSubcommand::Partner { account, company_name, business_type, tax_id, commission_rate } => {
            RegisterForm {
                company_name,
                business_type,
                tax_id,
                commission_rate,
                ..account_form(Role::Partner, account)
            }
        }
    };
    let registration = form.validate()?;

    let mut flow = AuthFlow::new(ctx.services.auth.clone(), navigate);
    match flow.register(&mut ctx.app, &registration).await {
        Some(session) => print_json(&session),
        None => Err(auth_error(flow.state().error.clone())),
    }
}

fn account_form(role: Role, account: AccountArgs) -> RegisterForm {
    RegisterForm {
        role,
        first_name: account.first_name,
        last_name: account.last_name,
        email: account.email,
        password: account.password,
        ..RegisterForm::default()
    }
}

fn auth_error(message: Option<String>) -> CliError {
    CliError::Auth(message.unwrap_or_else(|| "authentication failed".to_owned()))
}

async fn run_logout(ctx: &mut CliContext) -> Result<(), CliError> {
    let mut flow = AuthFlow::new(ctx.services.auth.clone(), navigate);
    flow.logout(&mut ctx.app).await;
    println!("logged out");
    Ok(())
}

async fn run_profile(ctx: &mut CliContext, profile: ProfileCommand) -> Result<(), CliError> {
    match profile.command {
        ProfileSubcommand::Show => {
            let profile = state::profile::fetch_user_profile(&mut ctx.app, &ctx.services.profile, "").await?;
            print_json(&profile)
        }
        ProfileSubcommand::Update { first_name, last_name, email, bio, website, social_links, picture } => {
            let profile_picture = picture.as_deref().map(read_upload).transpose()?;
            let form = ProfileForm {
                first_name,
                last_name,
                email,
                bio,
                website,
                social_media_links: social_links.join("\n"),
                profile_picture,
            };
            let update = form.validate()?;
            let user = state::user::update_profile(&mut ctx.app, &ctx.services.profile, update).await?;
            print_json(&user)
        }
    }
}

fn read_upload(path: &Path) -> Result<FileUpload, CliError> {
    let bytes = std::fs::read(path).map_err(|source| CliError::ReadFile { path: path.to_owned(), source })?;
    let file_name = path
        .file_name()
        .map_or_else(|| "upload".to_owned(), |name| name.to_string_lossy().into_owned());
    let mime = match path.extension().and_then(|ext| ext.to_str()).map(str::to_ascii_lowercase).as_deref() {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    };
    Ok(FileUpload { file_name, mime: mime.to_owned(), bytes })
}

fn require_role(ctx: &CliContext, allowed: &[Role]) -> Result<(), CliError> {
    match nav::guard(&ctx.app, allowed) {
        GuardOutcome::Allow => Ok(()),
        GuardOutcome::Redirect(path) => Err(CliError::Redirected(path)),
    }
}

async fn run_admin(ctx: &CliContext, admin: AdminCommand) -> Result<(), CliError> {
    require_role(ctx, &[Role::Admin])?;
    let service = &ctx.services.admin;
    match admin.command {
        AdminSubcommand::Stats => print_json(&service.dashboard_stats().await?),
        AdminSubcommand::Users { page, size, search, role, status } => {
            let query = UserListQuery { page, size, search, role, status };
            print_json(&service.users(&query).await?)
        }
        AdminSubcommand::User { user_id } => print_json(&service.user(&user_id).await?),
        AdminSubcommand::SetUserStatus { user_id, active } => {
            print_json(&service.update_user_status(&user_id, active).await?)
        }
        AdminSubcommand::DeleteUser { user_id } => {
            service.delete_user(&user_id).await?;
            println!("deleted user {user_id}");
            Ok(())
        }
        AdminSubcommand::Products { page, size, search, category_id, status } => {
            let query = ProductListQuery { page, size, search, category_id, status };
            print_json(&service.products(&query).await?)
        }
        AdminSubcommand::Product { product_id } => print_json(&service.product(&product_id).await?),
        AdminSubcommand::Archive { product_id, restore } => {
            print_json(&service.set_product_archived(&product_id, !restore).await?)
        }
        AdminSubcommand::DeleteProduct { product_id } => {
            service.delete_product(&product_id).await?;
            println!("deleted product {product_id}");
            Ok(())
        }
        AdminSubcommand::Settings => print_json(&service.settings().await?),
        AdminSubcommand::UpdateSettings { data } => {
            let settings = serde_json::from_str::<SystemSettings>(&data)?;
            print_json(&service.update_settings(&settings).await?)
        }
        AdminSubcommand::Roles => print_json(&service.roles().await?),
        AdminSubcommand::Permissions => print_json(&service.permissions().await?),
        AdminSubcommand::SetPermissions { role_id, permissions } => {
            print_json(&service.update_role_permissions(&role_id, &permissions).await?)
        }
    }
}

async fn run_partner(ctx: &CliContext, partner: PartnerCommand) -> Result<(), CliError> {
    require_role(ctx, &[Role::Partner])?;
    match partner.command {
        PartnerSubcommand::Stats => print_json(&ctx.services.dashboard.partner_stats().await),
        PartnerSubcommand::Orders { page, size, search, status } => {
            let query = OrderListQuery { page, size, search, status };
            print_json(&ctx.services.orders.orders(&query).await?)
        }
        PartnerSubcommand::OrderHistory { order_id } => {
            print_json(&ctx.services.orders.status_history(&order_id).await?)
        }
        PartnerSubcommand::UpdateOrder { order_id, current, status, notes } => {
            let update = OrderStatusUpdate { status, notes };
            print_json(&ctx.services.orders.update_status(&order_id, current, &update).await?)
        }
    }
}

fn print_json(value: &impl Serialize) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
