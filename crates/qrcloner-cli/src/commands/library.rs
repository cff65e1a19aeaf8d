//! Saved QR code commands: list, detail, delete, duplicate, restore, editor.

use anyhow::anyhow;
use qrcloner_api_models::QrSortKey;
use qrcloner_client::list::QR_ITEMS_PAGE_SIZE;
use qrcloner_client::{
    DetailState, EditorMode, EditorState, ListQuery, ListViewController, QrItems, QuotaState,
    ValidationError,
};

use crate::cli::{ItemDeleteArgs, ItemIdArgs, ItemListArgs, ItemSaveArgs, OutputFormat, PreviewArgs};
use crate::client::{AppContext, CliError, CliResult, confirm_prompt, login_required};
use crate::commands::{list_page, search_term};
use crate::output::{print_json, render_dashboard, render_item_detail, render_item_page};

fn item_list(ctx: &AppContext, args: ItemListArgs) -> ListViewController<QrItems> {
    let mut query = ListQuery::<QrSortKey>::new(QR_ITEMS_PAGE_SIZE);
    query.page = args.page;
    if let Some(sort) = args.sort {
        query.sort_by = sort.into();
    }
    if let Some(order) = args.order {
        query.sort_order = order.into();
    }
    query.search = search_term(args.search);
    query.folder_id = search_term(args.folder);
    query.tag_id = search_term(args.tag);
    query.deleted = args.deleted;
    ListViewController::with_query(ctx.client.clone(), ctx.session(), ctx.config.offline, query)
}

pub(crate) async fn handle_item_list(
    ctx: &AppContext,
    args: ItemListArgs,
    format: OutputFormat,
) -> CliResult<()> {
    let list = item_list(ctx, args);
    list.refresh().await;
    let page = list_page(ctx, list.state())?;
    render_item_page(&page, format)
}

pub(crate) async fn handle_item_show(
    ctx: &AppContext,
    args: ItemIdArgs,
    format: OutputFormat,
) -> CliResult<()> {
    match ctx.detail().load(&args.id).await {
        DetailState::Ready { item, degraded } => render_item_detail(&item, degraded, format),
        other => Err(detail_error(ctx, &other)),
    }
}

fn detail_error(ctx: &AppContext, state: &DetailState) -> CliError {
    let message = state.message().unwrap_or("QR code unavailable");
    match state {
        DetailState::InvalidId => CliError::validation(message),
        DetailState::Unauthenticated => login_required(ctx),
        DetailState::Failed { detail } => CliError::failure(anyhow!("{message}: {detail}")),
        DetailState::NotFound | DetailState::Ready { .. } => CliError::failure(anyhow!(message)),
    }
}

pub(crate) async fn handle_item_delete(ctx: &AppContext, args: ItemDeleteArgs) -> CliResult<()> {
    let assume_yes = args.yes;
    let outcome = ctx
        .detail()
        .delete(&args.id, |prompt| confirm_prompt(prompt, assume_yes))
        .await?;
    match outcome {
        Some(target) => {
            println!("Deleted QR code {}", args.id);
            println!("{}", ctx.link(&target));
        }
        None => println!("Delete cancelled"),
    }
    Ok(())
}

pub(crate) async fn handle_item_duplicate(ctx: &AppContext, args: ItemIdArgs) -> CliResult<()> {
    let target = ctx.detail().duplicate(&args.id).await?;
    println!("Duplicated QR code {}", args.id);
    println!("{}", ctx.link(&target));
    Ok(())
}

pub(crate) async fn handle_item_restore(ctx: &AppContext, args: ItemIdArgs) -> CliResult<()> {
    let target = ctx.detail().restore(&args.id).await?;
    println!("Restored QR code {}", args.id);
    println!("{}", ctx.link(&target));
    Ok(())
}

pub(crate) async fn handle_item_save(ctx: &AppContext, args: ItemSaveArgs) -> CliResult<()> {
    let editor = ctx.editor();
    let mut state = editor
        .open(args.edit.as_deref(), args.template.as_deref())
        .await?;
    if let Some(name) = args.name {
        state.name = name;
    }
    if let Some(qr_type) = args.qr_type {
        state.qr_type = qr_type;
    }
    if let Some(content) = args.content {
        state.content = content;
    }

    let verb = match state.mode() {
        EditorMode::Create => "Created",
        EditorMode::Edit => "Updated",
    };
    let target = editor.save(&state).await?;
    println!("{verb} QR code '{}'", state.name.trim());
    println!("{}", ctx.link(&target));
    Ok(())
}

pub(crate) async fn handle_preview(ctx: &AppContext, args: PreviewArgs) -> CliResult<()> {
    let state = EditorState {
        qr_type: args.qr_type,
        content: args.content,
        ..EditorState::default()
    };
    let preview = ctx
        .editor()
        .generate(&state)
        .await
        .ok_or(ValidationError::ContentRequired)?;
    if preview.is_placeholder() {
        eprintln!("note: preview service unavailable; showing placeholder");
    }
    print_json(&preview.to_json())
}

pub(crate) async fn handle_dashboard(
    ctx: &AppContext,
    args: ItemListArgs,
    format: OutputFormat,
) -> CliResult<()> {
    let list = item_list(ctx, args);
    let quota = ctx.quota();
    let (_, quota_state) = tokio::join!(list.refresh(), quota.refresh());
    let page = list_page(ctx, list.state())?;
    let report = match quota_state {
        QuotaState::Ready(report) => Some(report),
        QuotaState::Unauthenticated => return Err(login_required(ctx)),
        QuotaState::Failed(message) => {
            eprintln!("warning: {message}");
            None
        }
    };
    render_dashboard(&page, report.as_ref(), format)
}
