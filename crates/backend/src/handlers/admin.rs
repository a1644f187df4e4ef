//! Admin screens for product categories.
//!
//! The term form itself (name, slug, parent, description) belongs to the
//! catalog; the slider meta section is appended by the category meta binding
//! when the slider is active.

use std::collections::HashMap;

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{Html, Redirect},
    Form,
};
use contracts::domain::a001_product_category::aggregate::{ProductCategory, ProductCategoryDto};
use contracts::system::auth::TokenClaims;

use super::a001_product_category::service_error;
use crate::domain::a001_product_category;
use crate::shared::html::{esc_attr, esc_html};
use crate::shared::slider::{admin_assets, Asset};
use crate::shared::term_meta::MetaError;
use crate::system::auth::extractor::CurrentUser;
use crate::system::state::AppState;

/// Header set by the editor's background saves
pub const AUTOSAVE_HEADER: &str = "x-wcs-autosave";

/// GET /admin/notices
pub async fn notices(State(state): State<AppState>, CurrentUser(user): CurrentUser) -> Html<String> {
    Html(state.availability.admin_notice(user.is_admin).unwrap_or_default())
}

/// GET /admin/product-categories/new
pub async fn new_category(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Html<String>, StatusCode> {
    let categories = load_categories(&state).await?;
    let meta_section = state
        .availability
        .core()
        .map(|core| core.binding().on_create_form(&user.sub))
        .unwrap_or_default();

    Ok(Html(screen(
        &state,
        &user,
        "Add new category",
        "/admin/product-categories",
        None,
        &categories,
        &meta_section,
    )))
}

/// POST /admin/product-categories
pub async fn create_category(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    headers: HeaderMap,
    Form(form): Form<HashMap<String, String>>,
) -> Result<Redirect, (StatusCode, String)> {
    let dto = dto_from_form(&form, None);
    let category = a001_product_category::service::create(&state.conn, dto)
        .await
        .map_err(service_error)?;
    let id = category.id.value();

    save_meta(&state, id, &form, &user, &headers).await?;
    Ok(Redirect::to(&format!("/admin/product-categories/{}/edit", id)))
}

/// GET /admin/product-categories/:id/edit
pub async fn edit_category(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i64>,
) -> Result<Html<String>, StatusCode> {
    let category = match a001_product_category::service::get_by_id(&state.conn, id).await {
        Ok(Some(category)) => category,
        Ok(None) => return Err(StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::error!("Failed to load product category {}: {}", id, e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };
    let categories = load_categories(&state).await?;

    let meta_section = match state.availability.core() {
        Some(core) => core
            .binding()
            .on_edit_form(id, &user.sub)
            .await
            .map_err(|e| {
                tracing::error!("Failed to render meta fields of category {}: {}", id, e);
                StatusCode::INTERNAL_SERVER_ERROR
            })?,
        None => String::new(),
    };

    Ok(Html(screen(
        &state,
        &user,
        "Edit category",
        &format!("/admin/product-categories/{}", id),
        Some(&category),
        &categories,
        &meta_section,
    )))
}

/// POST /admin/product-categories/:id
pub async fn update_category(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i64>,
    headers: HeaderMap,
    Form(form): Form<HashMap<String, String>>,
) -> Result<Redirect, (StatusCode, String)> {
    let dto = dto_from_form(&form, Some(id));
    a001_product_category::service::update(&state.conn, id, dto)
        .await
        .map_err(service_error)?;

    save_meta(&state, id, &form, &user, &headers).await?;
    Ok(Redirect::to(&format!("/admin/product-categories/{}/edit", id)))
}

/// Runs the meta binding after the term itself was saved.
///
/// A rejected nonce is only logged: the admin is redirected as if the save
/// went through and the stored meta stays untouched.
async fn save_meta(
    state: &AppState,
    term_id: i64,
    form: &HashMap<String, String>,
    user: &TokenClaims,
    headers: &HeaderMap,
) -> Result<(), (StatusCode, String)> {
    let Some(core) = state.availability.core() else {
        return Ok(());
    };
    let binding = core.binding();
    let autosave = headers
        .get(AUTOSAVE_HEADER)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == "1");
    let ctx = binding.save_context(form, &user.sub, autosave);

    match binding.on_save(term_id, binding.taxonomy(), form, &ctx).await {
        Ok(report) => {
            tracing::debug!(
                "Term meta of {} saved: {} writes, {} deletes",
                report.entity_id,
                report.writes,
                report.deletes
            );
            Ok(())
        }
        Err(MetaError::Authorization) => {
            tracing::warn!(
                "Rejected term meta save for {} by user {}: invalid nonce",
                term_id,
                user.sub
            );
            Ok(())
        }
        Err(MetaError::Store(e)) => {
            tracing::error!("Failed to save term meta of {}: {}", term_id, e);
            Err((StatusCode::INTERNAL_SERVER_ERROR, "Internal error".to_string()))
        }
    }
}

fn dto_from_form(form: &HashMap<String, String>, id: Option<i64>) -> ProductCategoryDto {
    let field = |name: &str| form_field(form, name);
    ProductCategoryDto {
        id,
        name: field("name").to_string(),
        slug: Some(field("slug"))
            .filter(|s| !s.is_empty())
            .map(str::to_string),
        parent_id: field("parent").parse::<i64>().ok().filter(|p| *p > 0),
        description: form.get("description").cloned().unwrap_or_default(),
    }
}

fn form_field<'a>(form: &'a HashMap<String, String>, name: &str) -> &'a str {
    form.get(name).map(|v| v.trim()).unwrap_or_default()
}

async fn load_categories(state: &AppState) -> Result<Vec<ProductCategory>, StatusCode> {
    a001_product_category::service::list_all(&state.conn)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list product categories: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })
}

fn screen(
    state: &AppState,
    user: &TokenClaims,
    title: &str,
    action: &str,
    category: Option<&ProductCategory>,
    categories: &[ProductCategory],
    meta_section: &str,
) -> String {
    let notice = state
        .availability
        .admin_notice(user.is_admin)
        .unwrap_or_default();
    let name = category.map(|c| c.name.as_str()).unwrap_or_default();
    let slug = category.map(|c| c.slug.as_str()).unwrap_or_default();
    let description = category.map(|c| c.description.as_str()).unwrap_or_default();
    let parent_id = category.and_then(|c| c.parent_id).map(|p| p.value());
    let own_id = category.map(|c| c.id.value());

    // the picker script is only needed next to an image control
    let scripts: String = if meta_section.is_empty() {
        String::new()
    } else {
        admin_assets(&state.config.site.assets_url)
            .iter()
            .map(Asset::tag)
            .collect::<Vec<_>>()
            .join("\n")
    };

    let mut parents = String::from(r#"<option value="">None</option>"#);
    for candidate in categories.iter().filter(|c| Some(c.id.value()) != own_id) {
        let selected = if Some(candidate.id.value()) == parent_id {
            r#" selected="selected""#
        } else {
            ""
        };
        parents.push_str(&format!(
            r#"<option value="{}"{}>{}</option>"#,
            candidate.id.value(),
            selected,
            esc_html(&candidate.name)
        ));
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head><meta charset="utf-8"><title>{title}</title></head>
<body class="wp-admin taxonomy-product_cat">
{notice}
<h1>{title}</h1>
<form method="post" action="{action}" id="edittag">
<table class="form-table">
<tr class="form-field form-required"><th><label for="name">Name</label></th><td><input name="name" id="name" type="text" value="{name}" required /></td></tr>
<tr class="form-field"><th><label for="slug">Slug</label></th><td><input name="slug" id="slug" type="text" value="{slug}" /></td></tr>
<tr class="form-field"><th><label for="parent">Parent category</label></th><td><select name="parent" id="parent">{parents}</select></td></tr>
<tr class="form-field"><th><label for="description">Description</label></th><td><textarea name="description" id="description" rows="5" cols="50">{description}</textarea></td></tr>
</table>
{meta_section}
<p class="submit"><input type="submit" class="button button-primary" value="Save" /></p>
</form>
{scripts}
</body>
</html>
"#,
        title = esc_html(title),
        notice = notice,
        action = esc_attr(action),
        name = esc_attr(name),
        slug = esc_attr(slug),
        parents = parents,
        description = esc_html(description),
        meta_section = meta_section,
        scripts = scripts,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dto_from_form() {
        let form: HashMap<String, String> = [
            ("name", " Shoes "),
            ("slug", ""),
            ("parent", "0"),
            ("description", "All shoes"),
            ("product_cat_nonce", "abc"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let dto = dto_from_form(&form, Some(3));
        assert_eq!(dto.id, Some(3));
        assert_eq!(dto.name, "Shoes");
        assert_eq!(dto.slug, None);
        assert_eq!(dto.parent_id, None);
        assert_eq!(dto.description, "All shoes");
    }
}
