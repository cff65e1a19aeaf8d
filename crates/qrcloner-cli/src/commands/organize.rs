//! Folder and tag commands.

use crate::cli::{FolderCreateArgs, OutputFormat, TagCreateArgs};
use crate::client::{AppContext, CliResult};
use crate::output::{print_json, render_folders, render_tags};

pub(crate) async fn handle_folder_list(ctx: &AppContext, format: OutputFormat) -> CliResult<()> {
    let folders = ctx.organizer().folders().await?;
    render_folders(&folders, format)
}

pub(crate) async fn handle_folder_create(
    ctx: &AppContext,
    args: FolderCreateArgs,
    format: OutputFormat,
) -> CliResult<()> {
    let folder = ctx
        .organizer()
        .create_folder(&args.name, args.parent.as_deref())
        .await?;
    match format {
        OutputFormat::Json => print_json(&folder),
        OutputFormat::Table => {
            println!("Created folder '{}' ({})", folder.name, folder.id);
            println!("List its items with: qrcloner ls --folder {}", folder.id);
            Ok(())
        }
    }
}

pub(crate) async fn handle_tag_list(ctx: &AppContext, format: OutputFormat) -> CliResult<()> {
    let tags = ctx.organizer().tags().await?;
    render_tags(&tags, format)
}

pub(crate) async fn handle_tag_create(
    ctx: &AppContext,
    args: TagCreateArgs,
    format: OutputFormat,
) -> CliResult<()> {
    let tag = ctx
        .organizer()
        .create_tag(&args.name, args.color.as_deref())
        .await?;
    match format {
        OutputFormat::Json => print_json(&tag),
        OutputFormat::Table => {
            println!("Created tag '{}' ({})", tag.name, tag.id);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::context_with;
    use httpmock::prelude::*;
    use serde_json::json;

    #[tokio::test]
    async fn folder_list_renders_table() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/library/folders")
                .header("authorization", "Bearer token-123");
            then.status(200).json_body(json!({
                "folders": [{
                    "id": "f1",
                    "name": "Clients",
                    "created_at": "2025-10-20T00:00:00Z",
                    "updated_at": "2025-10-20T00:00:00Z"
                }]
            }));
        });

        let ctx = context_with(&server);
        handle_folder_list(&ctx, OutputFormat::Table)
            .await
            .expect("folders render");
        mock.assert();
    }

    #[tokio::test]
    async fn duplicate_folder_is_a_validation_error() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST).path("/library/folders");
            then.status(400)
                .json_body(json!({"detail": "Folder with this name already exists"}));
        });

        let ctx = context_with(&server);
        let err = handle_folder_create(
            &ctx,
            FolderCreateArgs {
                name: "Clients".to_string(),
                parent: None,
            },
            OutputFormat::Table,
        )
        .await
        .expect_err("duplicate");
        assert_eq!(err.exit_code(), 2);
        assert_eq!(err.display_message(), "Folder with this name already exists");
    }

    #[tokio::test]
    async fn bad_tag_colour_exits_with_validation_code() {
        let ctx = context_with(&MockServer::start_async().await);
        let err = handle_tag_create(
            &ctx,
            TagCreateArgs {
                name: "work".to_string(),
                color: Some("#12345".to_string()),
            },
            OutputFormat::Json,
        )
        .await
        .expect_err("bad colour");
        assert_eq!(err.exit_code(), 2);
    }

    #[tokio::test]
    async fn tag_create_sends_colour() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/library/tags")
                .json_body(json!({"name": "urgent", "color": "#ff0000"}));
            then.status(201).json_body(json!({
                "id": "t2",
                "name": "urgent",
                "color": "#ff0000",
                "created_at": "2025-10-20T00:00:00Z"
            }));
        });

        let ctx = context_with(&server);
        handle_tag_create(
            &ctx,
            TagCreateArgs {
                name: "urgent".to_string(),
                color: Some("#ff0000".to_string()),
            },
            OutputFormat::Table,
        )
        .await
        .expect("tag created");
        mock.assert();
    }
}
