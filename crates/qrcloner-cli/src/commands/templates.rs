//! Template gallery and template administration commands.

use std::fs;
use std::path::Path;

use anyhow::anyhow;
use qrcloner_api_models::{
    CategoryCreate, Template, TemplateCreate, TemplateSortKey, TemplateUpdate,
};
use qrcloner_client::list::{ADMIN_TEMPLATES_PAGE_SIZE, ListResource, TEMPLATES_PAGE_SIZE};
use qrcloner_client::validate::mime_from_extension;
use qrcloner_client::{AssetUpload, ListQuery, ListViewController};
use serde::de::DeserializeOwned;

use crate::cli::{
    AdminListArgs, CategoryArgs, FileArgs, ItemDeleteArgs, ItemIdArgs, OutputFormat,
    TemplateListArgs, TemplateUpdateArgs, UploadArgs,
};
use crate::client::{AppContext, CliError, CliResult, confirm_prompt};
use crate::commands::{list_page, search_term};
use crate::output::{
    print_json, publication_label, render_categories, render_template, render_template_page,
};

fn template_query(args: TemplateListArgs, per_page: u32) -> ListQuery<TemplateSortKey> {
    let mut query = ListQuery::new(per_page);
    query.page = args.page;
    if let Some(sort) = args.sort {
        query.sort_by = sort.into();
    }
    if let Some(order) = args.order {
        query.sort_order = order.into();
    }
    query.search = search_term(args.search);
    query.category_id = search_term(args.category);
    query.tag = search_term(args.tag);
    query
}

async fn show_list<R>(
    ctx: &AppContext,
    list: ListViewController<R>,
    format: OutputFormat,
) -> CliResult<()>
where
    R: ListResource<Item = Template>,
{
    list.refresh().await;
    let page = list_page(ctx, list.state())?;
    render_template_page(&page, format)
}

pub(crate) async fn handle_template_list(
    ctx: &AppContext,
    args: TemplateListArgs,
    format: OutputFormat,
) -> CliResult<()> {
    let list = ctx
        .gallery()
        .list_with(template_query(args, TEMPLATES_PAGE_SIZE));
    show_list(ctx, list, format).await
}

pub(crate) async fn handle_categories(ctx: &AppContext, format: OutputFormat) -> CliResult<()> {
    let categories = ctx.gallery().categories().await?;
    render_categories(&categories, format)
}

pub(crate) async fn handle_template_show(
    ctx: &AppContext,
    args: ItemIdArgs,
    format: OutputFormat,
) -> CliResult<()> {
    let template = ctx.gallery().get(&args.id).await?;
    render_template(&template, format)
}

pub(crate) fn handle_template_use(ctx: &AppContext, args: ItemIdArgs) -> CliResult<()> {
    let target = ctx.gallery().use_template(&args.id)?;
    println!("Open the editor at {}", ctx.link(&target));
    println!("or run: qrcloner save --template {} --name <NAME>", args.id);
    Ok(())
}

pub(crate) async fn handle_admin_list(
    ctx: &AppContext,
    args: AdminListArgs,
    format: OutputFormat,
) -> CliResult<()> {
    let mut query = template_query(args.list, ADMIN_TEMPLATES_PAGE_SIZE);
    query.published = args.status.as_filter();
    show_list(ctx, ctx.admin().list_with(query), format).await
}

pub(crate) async fn handle_admin_create(
    ctx: &AppContext,
    args: FileArgs,
    format: OutputFormat,
) -> CliResult<()> {
    let body: TemplateCreate = read_json(&args.file)?;
    let template = ctx.admin().create(&body).await?;
    render_template(&template, format)
}

pub(crate) async fn handle_admin_update(
    ctx: &AppContext,
    args: TemplateUpdateArgs,
    format: OutputFormat,
) -> CliResult<()> {
    let body: TemplateUpdate = read_json(&args.file)?;
    let template = ctx.admin().update(&args.id, &body).await?;
    render_template(&template, format)
}

pub(crate) async fn handle_admin_delete(ctx: &AppContext, args: ItemDeleteArgs) -> CliResult<()> {
    let assume_yes = args.yes;
    let deleted = ctx
        .admin()
        .delete(&args.id, |prompt| confirm_prompt(prompt, assume_yes))
        .await?;
    if deleted {
        println!("Deleted template {}", args.id);
    } else {
        println!("Delete cancelled");
    }
    Ok(())
}

pub(crate) async fn handle_admin_publish(
    ctx: &AppContext,
    args: ItemIdArgs,
    published: bool,
) -> CliResult<()> {
    let admin = ctx.admin();
    let template = if published {
        admin.publish(&args.id).await?
    } else {
        admin.unpublish(&args.id).await?
    };
    println!(
        "Template {} is now {}",
        template.id,
        publication_label(template.is_published)
    );
    Ok(())
}

pub(crate) async fn handle_admin_toggle(ctx: &AppContext, args: ItemIdArgs) -> CliResult<()> {
    let admin = ctx.admin();
    let current = admin.get(&args.id).await?;
    let template = admin.toggle_publish(&current).await?;
    println!(
        "Template {} is now {}",
        template.id,
        publication_label(template.is_published)
    );
    Ok(())
}

pub(crate) async fn handle_admin_category(
    ctx: &AppContext,
    args: CategoryArgs,
    format: OutputFormat,
) -> CliResult<()> {
    let body = CategoryCreate {
        name: args.name.trim().to_string(),
        slug: args.slug.trim().to_string(),
        description: search_term(args.description),
    };
    let category = ctx.admin().create_category(&body).await?;
    match format {
        OutputFormat::Json => print_json(&category),
        OutputFormat::Table => {
            println!("Created category '{}' ({})", category.name, category.id);
            Ok(())
        }
    }
}

pub(crate) async fn handle_admin_upload(ctx: &AppContext, args: UploadArgs) -> CliResult<()> {
    let file_name = args
        .path
        .file_name()
        .and_then(|name| name.to_str())
        .map(str::to_string)
        .ok_or_else(|| CliError::validation("upload path must name a file"))?;
    let mime_type = mime_from_extension(&file_name).unwrap_or("application/octet-stream");
    let bytes = fs::read(&args.path).map_err(|err| {
        CliError::failure(anyhow!(
            "failed to read upload '{}': {err}",
            args.path.display()
        ))
    })?;
    let upload = AssetUpload {
        template_id: args.template_id,
        asset_type: args.asset_type,
        file_name,
        mime_type: mime_type.to_string(),
        bytes,
    };
    let uploaded = ctx.admin().upload(upload).await?;
    println!("Uploaded {} as asset {}", uploaded.file_name, uploaded.id);
    println!("{}", uploaded.s3_url);
    Ok(())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> CliResult<T> {
    let contents = fs::read(path).map_err(|err| {
        CliError::failure(anyhow!("failed to read '{}': {err}", path.display()))
    })?;
    serde_json::from_slice(&contents).map_err(|err| {
        CliError::validation(format!("invalid template JSON in '{}': {err}", path.display()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::PublicationFilter;
    use crate::client::context_with;
    use httpmock::prelude::*;
    use serde_json::{Value, json};

    fn template_json(id: &str, published: bool) -> Value {
        json!({
            "id": id,
            "name": "Business Card",
            "type": "vcard",
            "payload_template": {"name": ""},
            "is_published": published,
            "created_at": "2025-10-20T00:00:00Z",
            "updated_at": "2025-10-20T00:00:00Z"
        })
    }

    fn list_args() -> TemplateListArgs {
        TemplateListArgs {
            page: 1,
            ..TemplateListArgs::default()
        }
    }

    #[tokio::test]
    async fn gallery_list_filters_by_category_and_tag() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/templates")
                .query_param("per_page", "12")
                .query_param("category_id", "c-1")
                .query_param("tag", "wifi");
            then.status(200).json_body(json!({
                "templates": [template_json("t-1", true)],
                "total": 1
            }));
        });

        let ctx = context_with(&server);
        let args = TemplateListArgs {
            category: Some("c-1".to_string()),
            tag: Some("wifi".to_string()),
            ..list_args()
        };
        handle_template_list(&ctx, args, OutputFormat::Table)
            .await
            .expect("gallery renders");
        mock.assert();
    }

    #[tokio::test]
    async fn admin_list_requests_drafts_only() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/admin/templates")
                .query_param("per_page", "50")
                .query_param("is_published", "false")
                .header("authorization", "Bearer token-123");
            then.status(200).json_body(json!({
                "templates": [template_json("t-2", false)],
                "total": 1
            }));
        });

        let ctx = context_with(&server);
        let args = AdminListArgs {
            list: list_args(),
            status: PublicationFilter::Draft,
        };
        handle_admin_list(&ctx, args, OutputFormat::Json)
            .await
            .expect("admin list renders");
        mock.assert();
    }

    #[tokio::test]
    async fn toggle_flips_current_state() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/admin/templates/t-1");
            then.status(200).json_body(template_json("t-1", false));
        });
        let publish = server.mock(|when, then| {
            when.method(POST).path("/admin/templates/t-1/publish");
            then.status(200).json_body(template_json("t-1", true));
        });

        let ctx = context_with(&server);
        handle_admin_toggle(
            &ctx,
            ItemIdArgs {
                id: "t-1".to_string(),
            },
        )
        .await
        .expect("toggle succeeds");
        publish.assert();
    }

    #[tokio::test]
    async fn unpublish_hits_unpublish_endpoint() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(POST).path("/admin/templates/t-1/unpublish");
            then.status(200).json_body(template_json("t-1", false));
        });

        let ctx = context_with(&server);
        handle_admin_publish(
            &ctx,
            ItemIdArgs {
                id: "t-1".to_string(),
            },
            false,
        )
        .await
        .expect("unpublish succeeds");
        mock.assert();
    }

    #[tokio::test]
    async fn bad_category_slug_is_a_validation_error() {
        let ctx = context_with(&MockServer::start_async().await);
        let err = handle_admin_category(
            &ctx,
            CategoryArgs {
                name: "Business Cards".to_string(),
                slug: "Business Cards".to_string(),
                description: None,
            },
            OutputFormat::Table,
        )
        .await
        .expect_err("bad slug");
        assert_eq!(err.exit_code(), 2);
    }

    #[tokio::test]
    async fn admin_delete_with_yes() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(DELETE).path("/admin/templates/t-1");
            then.status(204);
        });

        let ctx = context_with(&server);
        handle_admin_delete(
            &ctx,
            ItemDeleteArgs {
                id: "t-1".to_string(),
                yes: true,
            },
        )
        .await
        .expect("delete succeeds");
        mock.assert();
    }

    #[test]
    fn use_template_rejects_blank_id() {
        let ctx = context_with(&MockServer::start());
        handle_template_use(
            &ctx,
            ItemIdArgs {
                id: "t-1".to_string(),
            },
        )
        .expect("editor link");
        let err = handle_template_use(&ctx, ItemIdArgs { id: String::new() })
            .expect_err("blank id");
        assert_eq!(err.exit_code(), 2);
    }

    #[tokio::test]
    async fn create_rejects_malformed_template_file() {
        let path = std::env::temp_dir().join(format!(
            "qrcloner-template-{}.json",
            uuid::Uuid::new_v4()
        ));
        fs::write(&path, b"{not json").expect("write temp file");

        let ctx = context_with(&MockServer::start_async().await);
        let err = handle_admin_create(&ctx, FileArgs { file: path.clone() }, OutputFormat::Table)
            .await
            .expect_err("malformed");
        let _ = fs::remove_file(&path);
        assert_eq!(err.exit_code(), 2);
        assert!(err.display_message().contains("invalid template JSON"));
    }

    #[tokio::test]
    async fn upload_sends_file_as_multipart() {
        let path = std::env::temp_dir().join(format!("qrcloner-{}.png", uuid::Uuid::new_v4()));
        fs::write(&path, [0x89, b'P', b'N', b'G']).expect("write temp file");

        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/admin/templates/upload")
                .header("authorization", "Bearer token-123");
            then.status(200).json_body(json!({
                "id": "a-1",
                "file_name": "logo.png",
                "s3_url": "http://minio:9000/qr-assets/templates/t-1/logo.png"
            }));
        });

        let ctx = context_with(&server);
        let result = handle_admin_upload(
            &ctx,
            UploadArgs {
                template_id: "t-1".to_string(),
                path: path.clone(),
                asset_type: qrcloner_api_models::AssetType::Logo,
            },
        )
        .await;
        let _ = fs::remove_file(&path);
        result.expect("upload succeeds");
        mock.assert();
    }
}
