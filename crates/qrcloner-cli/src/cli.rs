//! Argument parsing and command dispatch for the `qrcloner` CLI.

use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use qrcloner_api_models::{
    AnalyticsPeriod, AssetType, PlanTier, QrItemType, QrSortKey, SortOrder, TemplateSortKey,
};
use qrcloner_client::config::{
    self, DEFAULT_API_BASE, DEFAULT_APP_ORIGIN, ENV_API_BASE, ENV_APP_ORIGIN, ENV_OFFLINE,
    ENV_TIMEOUT_SECS, ENV_TOKEN,
};
use qrcloner_client::{ClientConfig, OfflineMode, ResourceClient, analytics::DEFAULT_DAYS};
use qrcloner_telemetry::{LogFormat, LoggingConfig, init_logging};
use url::Url;
use uuid::Uuid;

use crate::client::{AppContext, CliDependencies, CliResult};
use crate::commands::analytics::{handle_analytics_summary, handle_analytics_timeseries};
use crate::commands::billing::{
    handle_checkout, handle_plans, handle_portal, handle_quota, handle_usage,
};
use crate::commands::library::{
    handle_dashboard, handle_item_delete, handle_item_duplicate, handle_item_list,
    handle_item_restore, handle_item_save, handle_item_show, handle_preview,
};
use crate::commands::organize::{
    handle_folder_create, handle_folder_list, handle_tag_create, handle_tag_list,
};
use crate::commands::templates::{
    handle_admin_category, handle_admin_create, handle_admin_delete, handle_admin_list,
    handle_admin_publish, handle_admin_toggle, handle_admin_update, handle_admin_upload,
    handle_categories, handle_template_list, handle_template_show, handle_template_use,
};

const DEFAULT_LOG_LEVEL: &str = "warn";

/// Parses CLI arguments, executes the requested command, and reports the
/// outcome. Returns the process exit code.
pub async fn run() -> i32 {
    let cli = Cli::parse();
    if let Err(err) = init_logging(&LoggingConfig {
        level: &cli.log_level,
        format: cli.log_format,
    }) {
        eprintln!("warning: {err:#}");
    }

    let command_name = command_label(&cli.command);
    let trace_id = Uuid::new_v4().to_string();
    let config = cli.client_config();
    let deps = match CliDependencies::from_config(&config, &trace_id) {
        Ok(deps) => deps,
        Err(err) => {
            eprintln!("error: {}", err.display_message());
            return err.exit_code();
        }
    };

    let result = dispatch(cli, config, &deps).await;

    match result {
        Ok(()) => {
            tracing::debug!(command = command_name, trace_id, "command succeeded");
            0
        }
        Err(err) => {
            let exit_code = err.exit_code();
            tracing::debug!(command = command_name, trace_id, exit_code, "command failed");
            eprintln!("error: {}", err.display_message());
            exit_code
        }
    }
}

async fn dispatch(cli: Cli, config: ClientConfig, deps: &CliDependencies) -> CliResult<()> {
    let ctx = AppContext {
        client: ResourceClient::new(deps.client.clone()),
        config,
    };
    let output = cli.output;

    match cli.command {
        Command::Ls(args) => handle_item_list(&ctx, args, output).await,
        Command::Show(args) => handle_item_show(&ctx, args, output).await,
        Command::Rm(args) => handle_item_delete(&ctx, args).await,
        Command::Dup(args) => handle_item_duplicate(&ctx, args).await,
        Command::Restore(args) => handle_item_restore(&ctx, args).await,
        Command::Save(args) => handle_item_save(&ctx, args).await,
        Command::Preview(args) => handle_preview(&ctx, args).await,
        Command::Dashboard(args) => handle_dashboard(&ctx, args, output).await,
        Command::Quota(args) => handle_quota(&ctx, args, output).await,
        Command::Billing(billing) => match billing {
            BillingCommand::Plans => handle_plans(&ctx, output).await,
            BillingCommand::Usage => handle_usage(&ctx, output).await,
            BillingCommand::Checkout(args) => handle_checkout(&ctx, args).await,
            BillingCommand::Portal => handle_portal(&ctx).await,
        },
        Command::Templates(templates) => match templates {
            TemplateCommand::Ls(args) => handle_template_list(&ctx, args, output).await,
            TemplateCommand::Categories => handle_categories(&ctx, output).await,
            TemplateCommand::Show(args) => handle_template_show(&ctx, args, output).await,
            TemplateCommand::Use(args) => handle_template_use(&ctx, args),
        },
        Command::Admin(admin) => match admin {
            AdminCommand::Ls(args) => handle_admin_list(&ctx, args, output).await,
            AdminCommand::Create(args) => handle_admin_create(&ctx, args, output).await,
            AdminCommand::Update(args) => handle_admin_update(&ctx, args, output).await,
            AdminCommand::Rm(args) => handle_admin_delete(&ctx, args).await,
            AdminCommand::Publish(args) => handle_admin_publish(&ctx, args, true).await,
            AdminCommand::Unpublish(args) => handle_admin_publish(&ctx, args, false).await,
            AdminCommand::Toggle(args) => handle_admin_toggle(&ctx, args).await,
            AdminCommand::Category(args) => handle_admin_category(&ctx, args, output).await,
            AdminCommand::Upload(args) => handle_admin_upload(&ctx, args).await,
        },
        Command::Analytics(analytics) => match analytics {
            AnalyticsCommand::Summary => handle_analytics_summary(&ctx, output).await,
            AnalyticsCommand::Timeseries(args) => {
                handle_analytics_timeseries(&ctx, args, output).await
            }
        },
        Command::Folders(folders) => match folders {
            FolderCommand::Ls => handle_folder_list(&ctx, output).await,
            FolderCommand::Create(args) => handle_folder_create(&ctx, args, output).await,
        },
        Command::Tags(tags) => match tags {
            TagCommand::Ls => handle_tag_list(&ctx, output).await,
            TagCommand::Create(args) => handle_tag_create(&ctx, args, output).await,
        },
    }
}

#[derive(Parser)]
#[command(name = "qrcloner", about = "Manage QR codes, templates and billing for QR Cloner")]
pub(crate) struct Cli {
    #[arg(
        long,
        global = true,
        env = ENV_API_BASE,
        value_parser = parse_url,
        default_value = DEFAULT_API_BASE
    )]
    pub(crate) api_url: Url,
    #[arg(long, global = true, env = ENV_TOKEN, hide_env_values = true)]
    pub(crate) token: Option<String>,
    #[arg(
        long,
        global = true,
        env = ENV_APP_ORIGIN,
        value_parser = parse_url,
        default_value = DEFAULT_APP_ORIGIN,
        help = "Front-end origin used for links and checkout return URLs"
    )]
    pub(crate) app_origin: Url,
    #[arg(
        long,
        global = true,
        env = ENV_OFFLINE,
        action = ArgAction::Set,
        num_args = 0..=1,
        require_equals = true,
        default_value = "false",
        default_missing_value = "true",
        value_parser = parse_offline,
        help = "Show sample data when the API is unreachable"
    )]
    pub(crate) offline: bool,
    #[arg(
        long,
        global = true,
        env = ENV_TIMEOUT_SECS,
        value_parser = parse_timeout,
        help = "Per-request timeout in seconds; unset waits indefinitely"
    )]
    pub(crate) timeout: Option<Duration>,
    #[arg(
        long = "output",
        alias = "format",
        global = true,
        value_enum,
        default_value_t = OutputFormat::Table,
        help = "Select output format for commands that render structured data"
    )]
    pub(crate) output: OutputFormat,
    #[arg(long, global = true, env = "QRCLONER_LOG_LEVEL", default_value = DEFAULT_LOG_LEVEL)]
    pub(crate) log_level: String,
    #[arg(
        long,
        global = true,
        env = "QRCLONER_LOG_FORMAT",
        value_parser = parse_log_format,
        default_value = "pretty"
    )]
    pub(crate) log_format: LogFormat,
    #[command(subcommand)]
    pub(crate) command: Command,
}

impl Cli {
    /// Client settings resolved from flags and their environment fallbacks.
    pub(crate) fn client_config(&self) -> ClientConfig {
        ClientConfig {
            api_base: self.api_url.clone(),
            token: self.token.clone(),
            app_origin: self.app_origin.clone(),
            offline: OfflineMode::from_flag(self.offline),
            timeout: self.timeout,
        }
    }
}

#[derive(Subcommand)]
pub(crate) enum Command {
    /// List saved QR codes.
    Ls(ItemListArgs),
    /// Show one QR code.
    Show(ItemIdArgs),
    /// Delete a QR code.
    Rm(ItemDeleteArgs),
    /// Duplicate a QR code.
    Dup(ItemIdArgs),
    /// Restore a deleted QR code.
    Restore(ItemIdArgs),
    /// Create or update a QR code.
    Save(ItemSaveArgs),
    /// Render a preview without saving.
    Preview(PreviewArgs),
    /// Recent QR codes plus plan usage.
    Dashboard(ItemListArgs),
    /// Plan usage and limits.
    Quota(QuotaArgs),
    /// Plans, usage, checkout and the billing portal.
    #[command(subcommand)]
    Billing(BillingCommand),
    /// Browse the template gallery.
    #[command(subcommand)]
    Templates(TemplateCommand),
    /// Manage templates and categories (admin token required).
    #[command(subcommand)]
    Admin(AdminCommand),
    /// Usage analytics.
    #[command(subcommand)]
    Analytics(AnalyticsCommand),
    /// Folders for filing QR codes.
    #[command(subcommand)]
    Folders(FolderCommand),
    /// Tags for labelling QR codes.
    #[command(subcommand)]
    Tags(TagCommand),
}

#[derive(Subcommand)]
pub(crate) enum BillingCommand {
    /// Public plan catalog.
    Plans,
    /// Usage meters for the current period.
    Usage,
    /// Start checkout for a paid plan.
    Checkout(CheckoutArgs),
    /// Open the billing portal.
    Portal,
}

#[derive(Subcommand)]
pub(crate) enum TemplateCommand {
    /// Browse published templates.
    Ls(TemplateListArgs),
    /// List template categories.
    Categories,
    /// Show one template.
    Show(ItemIdArgs),
    /// Start the editor from a template.
    Use(ItemIdArgs),
}

#[derive(Subcommand)]
pub(crate) enum AdminCommand {
    /// List all templates, including drafts.
    Ls(AdminListArgs),
    /// Create a template from a JSON file.
    Create(FileArgs),
    /// Update a template from a JSON file.
    Update(TemplateUpdateArgs),
    /// Delete a template.
    Rm(ItemDeleteArgs),
    /// Publish a template.
    Publish(ItemIdArgs),
    /// Unpublish a template.
    Unpublish(ItemIdArgs),
    /// Flip a template's publication flag.
    Toggle(ItemIdArgs),
    /// Create a template category.
    Category(CategoryArgs),
    /// Upload an image asset for a template.
    Upload(UploadArgs),
}

#[derive(Subcommand)]
pub(crate) enum AnalyticsCommand {
    /// Totals plus weekly and monthly counts.
    Summary,
    /// Bucketed counts over a window.
    Timeseries(TimeseriesArgs),
}

#[derive(Subcommand)]
pub(crate) enum FolderCommand {
    /// List folders.
    Ls,
    /// Create a folder.
    Create(FolderCreateArgs),
}

#[derive(Subcommand)]
pub(crate) enum TagCommand {
    /// List tags.
    Ls,
    /// Create a tag.
    Create(TagCreateArgs),
}

#[derive(Args, Default)]
pub(crate) struct ItemListArgs {
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub(crate) page: u32,
    #[arg(long, value_enum)]
    pub(crate) sort: Option<ItemSortArg>,
    #[arg(long, value_enum)]
    pub(crate) order: Option<OrderArg>,
    #[arg(long)]
    pub(crate) search: Option<String>,
    #[arg(long, help = "Only items filed under this folder")]
    pub(crate) folder: Option<String>,
    #[arg(long, help = "Only items carrying this tag identifier")]
    pub(crate) tag: Option<String>,
    #[arg(long, help = "List deleted items that can be restored")]
    pub(crate) deleted: bool,
}

#[derive(Args)]
pub(crate) struct ItemIdArgs {
    #[arg(help = "Resource identifier")]
    pub(crate) id: String,
}

#[derive(Args)]
pub(crate) struct ItemDeleteArgs {
    #[arg(help = "Resource identifier")]
    pub(crate) id: String,
    #[arg(long, short = 'y', help = "Skip the confirmation prompt")]
    pub(crate) yes: bool,
}

#[derive(Args, Default)]
pub(crate) struct ItemSaveArgs {
    #[arg(long)]
    pub(crate) name: Option<String>,
    #[arg(long = "type", value_parser = parse_item_type)]
    pub(crate) qr_type: Option<QrItemType>,
    #[arg(long, help = "Content: a JSON object or plain text")]
    pub(crate) content: Option<String>,
    #[arg(long, help = "Identifier of the item to update")]
    pub(crate) edit: Option<String>,
    #[arg(long, help = "Template to start from")]
    pub(crate) template: Option<String>,
}

#[derive(Args)]
pub(crate) struct PreviewArgs {
    #[arg(long = "type", value_parser = parse_item_type, default_value = "url")]
    pub(crate) qr_type: QrItemType,
    #[arg(long)]
    pub(crate) content: String,
}

#[derive(Args, Default)]
pub(crate) struct QuotaArgs {
    #[arg(long, help = "Follow the suggested upgrade or portal link")]
    pub(crate) act: bool,
}

#[derive(Args)]
pub(crate) struct CheckoutArgs {
    #[arg(value_parser = parse_plan)]
    pub(crate) plan: PlanTier,
}

#[derive(Args, Default)]
pub(crate) struct TemplateListArgs {
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub(crate) page: u32,
    #[arg(long, value_enum)]
    pub(crate) sort: Option<TemplateSortArg>,
    #[arg(long, value_enum)]
    pub(crate) order: Option<OrderArg>,
    #[arg(long)]
    pub(crate) search: Option<String>,
    #[arg(long)]
    pub(crate) category: Option<String>,
    #[arg(long)]
    pub(crate) tag: Option<String>,
}

#[derive(Args, Default)]
pub(crate) struct AdminListArgs {
    #[command(flatten)]
    pub(crate) list: TemplateListArgs,
    #[arg(long, value_enum, default_value_t = PublicationFilter::All)]
    pub(crate) status: PublicationFilter,
}

#[derive(Args)]
pub(crate) struct FileArgs {
    #[arg(short = 'f', long = "file")]
    pub(crate) file: PathBuf,
}

#[derive(Args)]
pub(crate) struct TemplateUpdateArgs {
    #[arg(help = "Template identifier")]
    pub(crate) id: String,
    #[arg(short = 'f', long = "file")]
    pub(crate) file: PathBuf,
}

#[derive(Args)]
pub(crate) struct CategoryArgs {
    #[arg(long)]
    pub(crate) name: String,
    #[arg(long)]
    pub(crate) slug: String,
    #[arg(long)]
    pub(crate) description: Option<String>,
}

#[derive(Args)]
pub(crate) struct UploadArgs {
    #[arg(help = "Template identifier")]
    pub(crate) template_id: String,
    #[arg(help = "Image file to upload")]
    pub(crate) path: PathBuf,
    #[arg(long = "asset-type", value_parser = parse_asset_type, default_value = "logo")]
    pub(crate) asset_type: AssetType,
}

#[derive(Args)]
pub(crate) struct FolderCreateArgs {
    #[arg(help = "Folder name")]
    pub(crate) name: String,
    #[arg(long, help = "Parent folder identifier")]
    pub(crate) parent: Option<String>,
}

#[derive(Args)]
pub(crate) struct TagCreateArgs {
    #[arg(help = "Tag name")]
    pub(crate) name: String,
    #[arg(long, help = "Colour as #rrggbb (default #0070f3)")]
    pub(crate) color: Option<String>,
}

#[derive(Args)]
pub(crate) struct TimeseriesArgs {
    #[arg(long, value_enum, default_value_t = PeriodArg::Daily)]
    pub(crate) period: PeriodArg,
    #[arg(long, default_value_t = DEFAULT_DAYS)]
    pub(crate) days: u32,
}

#[derive(Copy, Clone, Debug, Default, ValueEnum)]
pub(crate) enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
pub(crate) enum ItemSortArg {
    Name,
    CreatedAt,
    UpdatedAt,
    Type,
}

impl From<ItemSortArg> for QrSortKey {
    fn from(arg: ItemSortArg) -> Self {
        match arg {
            ItemSortArg::Name => Self::Name,
            ItemSortArg::CreatedAt => Self::CreatedAt,
            ItemSortArg::UpdatedAt => Self::UpdatedAt,
            ItemSortArg::Type => Self::Type,
        }
    }
}

#[derive(Copy, Clone, Debug, ValueEnum)]
pub(crate) enum TemplateSortArg {
    Name,
    CreatedAt,
    UpdatedAt,
}

impl From<TemplateSortArg> for TemplateSortKey {
    fn from(arg: TemplateSortArg) -> Self {
        match arg {
            TemplateSortArg::Name => Self::Name,
            TemplateSortArg::CreatedAt => Self::CreatedAt,
            TemplateSortArg::UpdatedAt => Self::UpdatedAt,
        }
    }
}

#[derive(Copy, Clone, Debug, ValueEnum)]
pub(crate) enum OrderArg {
    Asc,
    Desc,
}

impl From<OrderArg> for SortOrder {
    fn from(arg: OrderArg) -> Self {
        match arg {
            OrderArg::Asc => Self::Asc,
            OrderArg::Desc => Self::Desc,
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum PublicationFilter {
    #[default]
    All,
    Published,
    Draft,
}

impl PublicationFilter {
    pub(crate) const fn as_filter(self) -> Option<bool> {
        match self {
            Self::All => None,
            Self::Published => Some(true),
            Self::Draft => Some(false),
        }
    }
}

#[derive(Copy, Clone, Debug, ValueEnum)]
pub(crate) enum PeriodArg {
    Daily,
    Weekly,
}

impl From<PeriodArg> for AnalyticsPeriod {
    fn from(arg: PeriodArg) -> Self {
        match arg {
            PeriodArg::Daily => Self::Daily,
            PeriodArg::Weekly => Self::Weekly,
        }
    }
}

const fn command_label(command: &Command) -> &'static str {
    match command {
        Command::Ls(_) => "ls",
        Command::Show(_) => "show",
        Command::Rm(_) => "rm",
        Command::Dup(_) => "dup",
        Command::Restore(_) => "restore",
        Command::Save(_) => "save",
        Command::Preview(_) => "preview",
        Command::Dashboard(_) => "dashboard",
        Command::Quota(_) => "quota",
        Command::Billing(BillingCommand::Plans) => "billing_plans",
        Command::Billing(BillingCommand::Usage) => "billing_usage",
        Command::Billing(BillingCommand::Checkout(_)) => "billing_checkout",
        Command::Billing(BillingCommand::Portal) => "billing_portal",
        Command::Templates(TemplateCommand::Ls(_)) => "templates_ls",
        Command::Templates(TemplateCommand::Categories) => "templates_categories",
        Command::Templates(TemplateCommand::Show(_)) => "templates_show",
        Command::Templates(TemplateCommand::Use(_)) => "templates_use",
        Command::Admin(AdminCommand::Ls(_)) => "admin_ls",
        Command::Admin(AdminCommand::Create(_)) => "admin_create",
        Command::Admin(AdminCommand::Update(_)) => "admin_update",
        Command::Admin(AdminCommand::Rm(_)) => "admin_rm",
        Command::Admin(AdminCommand::Publish(_)) => "admin_publish",
        Command::Admin(AdminCommand::Unpublish(_)) => "admin_unpublish",
        Command::Admin(AdminCommand::Toggle(_)) => "admin_toggle",
        Command::Admin(AdminCommand::Category(_)) => "admin_category",
        Command::Admin(AdminCommand::Upload(_)) => "admin_upload",
        Command::Analytics(AnalyticsCommand::Summary) => "analytics_summary",
        Command::Analytics(AnalyticsCommand::Timeseries(_)) => "analytics_timeseries",
        Command::Folders(FolderCommand::Ls) => "folders_ls",
        Command::Folders(FolderCommand::Create(_)) => "folders_create",
        Command::Tags(TagCommand::Ls) => "tags_ls",
        Command::Tags(TagCommand::Create(_)) => "tags_create",
    }
}

fn parse_url(input: &str) -> Result<Url, String> {
    input
        .parse::<Url>()
        .map_err(|err| format!("invalid URL '{input}': {err}"))
}

fn parse_offline(input: &str) -> Result<bool, String> {
    config::parse_flag(ENV_OFFLINE, input).map_err(|err| err.to_string())
}

fn parse_timeout(input: &str) -> Result<Duration, String> {
    config::parse_timeout(input).map_err(|err| err.to_string())
}

fn parse_log_format(input: &str) -> Result<LogFormat, String> {
    input.parse()
}

fn parse_item_type(input: &str) -> Result<QrItemType, String> {
    input.parse().map_err(|err| format!("{err}"))
}

fn parse_plan(input: &str) -> Result<PlanTier, String> {
    input.parse().map_err(|err| format!("{err}"))
}

fn parse_asset_type(input: &str) -> Result<AssetType, String> {
    input.parse().map_err(|err| format!("{err}"))
}
