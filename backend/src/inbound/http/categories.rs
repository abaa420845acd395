//! Category HTTP handlers.
//!
//! ```text
//! GET    /category
//! GET    /category/new
//! POST   /category/new            name=Work
//! GET    /category/{id}/edit
//! POST   /category/{id}/edit      name=Office
//! DELETE /category/delete/{id}    _token=<hex>
//! ```

use actix_web::{HttpResponse, delete, get, post, web};
use serde::Serialize;
use utoipa::ToSchema;

use super::auth::CurrentUser;
use super::csrf::CsrfTokens;
use super::state::HttpState;
use super::views::{DeleteForm, FormView, parse_route_id, see_other};
use crate::domain::{
    ApiResult, Category, CategoryForm, CategoryId, CsrfScope, Error, Role, Submission,
    deny_access_unless_granted,
};

const INDEX: &str = "/category";

/// Listed category with the token needed to delete it.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryListItem {
    /// The category itself, flattened into the item.
    #[serde(flatten)]
    pub category: Category,
    /// Value to submit as `_token` when deleting this category.
    #[schema(example = "9f86d081884c7d659a2feaa0c55ad015a3bf4f1b2b0b822cd15d6c15b0f00a08")]
    pub delete_token: String,
}

async fn resolve(
    state: &HttpState,
    current: &CurrentUser,
    raw_id: &str,
) -> ApiResult<Category> {
    let id = CategoryId::from_uuid(parse_route_id(raw_id, "category")?);
    state.categories.resolve(current.user(), &id).await
}

fn respond(submission: Submission<Category>, form: CategoryForm) -> HttpResponse {
    match submission {
        Submission::Accepted(_) => see_other(INDEX),
        Submission::Rejected(errors) => FormView::rejected(form, errors).respond(),
    }
}

/// List categories from the category cache.
#[utoipa::path(
    get,
    path = "/category",
    responses(
        (status = 200, description = "Cached category list with delete tokens", body = [CategoryListItem]),
        (status = 401, description = "Login required", body = Error),
        (status = 403, description = "ROLE_USER missing", body = Error),
        (status = 503, description = "Database or cache unavailable", body = Error)
    ),
    tags = ["categories"],
    operation_id = "listCategories"
)]
#[get("/category")]
pub async fn list_categories(
    state: web::Data<HttpState>,
    current: CurrentUser,
) -> ApiResult<web::Json<Vec<CategoryListItem>>> {
    let categories = state.categories.list(current.user()).await?;
    let tokens = CsrfTokens::new(current.session());
    let items = categories
        .into_iter()
        .map(|category| {
            let delete_token = tokens.issue(&CsrfScope::delete(category.id()))?;
            Ok(CategoryListItem {
                category,
                delete_token,
            })
        })
        .collect::<Result<Vec<_>, Error>>()?;
    Ok(web::Json(items))
}

/// Render an empty category form.
#[utoipa::path(
    get,
    path = "/category/new",
    responses(
        (status = 200, description = "Empty form view"),
        (status = 401, description = "Login required", body = Error),
        (status = 403, description = "ROLE_USER missing", body = Error)
    ),
    tags = ["categories"],
    operation_id = "newCategoryForm"
)]
#[get("/category/new")]
pub async fn new_category_form(current: CurrentUser) -> ApiResult<HttpResponse> {
    deny_access_unless_granted(current.user(), Role::USER)?;
    Ok(FormView::blank(CategoryForm::default()).respond())
}

/// Create a category owned by the caller.
#[utoipa::path(
    post,
    path = "/category/new",
    request_body(content = CategoryForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Created; redirect to the index"),
        (status = 401, description = "Login required", body = Error),
        (status = 403, description = "ROLE_USER missing", body = Error),
        (status = 422, description = "Rejected form view")
    ),
    tags = ["categories"],
    operation_id = "createCategory"
)]
#[post("/category/new")]
pub async fn create_category(
    state: web::Data<HttpState>,
    current: CurrentUser,
    form: web::Form<CategoryForm>,
) -> ApiResult<HttpResponse> {
    let form = form.into_inner();
    let submission = state
        .category_commands
        .create(current.user(), &form)
        .await?;
    Ok(respond(submission, form))
}

/// Render the edit form of one of the caller's categories.
#[utoipa::path(
    get,
    path = "/category/{id}/edit",
    params(("id" = String, Path, description = "Category UUID")),
    responses(
        (status = 200, description = "Form view filled from the category"),
        (status = 401, description = "Login required", body = Error),
        (status = 403, description = "ROLE_USER missing", body = Error),
        (status = 404, description = "Unknown or foreign category", body = Error)
    ),
    tags = ["categories"],
    operation_id = "editCategoryForm"
)]
#[get("/category/{id}/edit")]
pub async fn edit_category_form(
    state: web::Data<HttpState>,
    current: CurrentUser,
    id: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let category = resolve(&state, &current, &id).await?;
    Ok(FormView::blank(CategoryForm::from_category(&category)).respond())
}

/// Rename one of the caller's categories.
#[utoipa::path(
    post,
    path = "/category/{id}/edit",
    params(("id" = String, Path, description = "Category UUID")),
    request_body(content = CategoryForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Updated; redirect to the index"),
        (status = 401, description = "Login required", body = Error),
        (status = 403, description = "ROLE_USER missing", body = Error),
        (status = 404, description = "Unknown or foreign category", body = Error),
        (status = 422, description = "Rejected form view")
    ),
    tags = ["categories"],
    operation_id = "editCategory"
)]
#[post("/category/{id}/edit")]
pub async fn edit_category(
    state: web::Data<HttpState>,
    current: CurrentUser,
    id: web::Path<String>,
    form: web::Form<CategoryForm>,
) -> ApiResult<HttpResponse> {
    let category = resolve(&state, &current, &id).await?;
    let form = form.into_inner();
    let submission = state
        .category_commands
        .edit(current.user(), category, &form)
        .await?;
    Ok(respond(submission, form))
}

/// Delete one of the caller's categories when the `_token` matches.
///
/// A missing or wrong token leaves the category in place; both paths
/// redirect to the index.
#[utoipa::path(
    delete,
    path = "/category/delete/{id}",
    params(("id" = String, Path, description = "Category UUID")),
    request_body(content = DeleteForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Redirect to the index"),
        (status = 401, description = "Login required", body = Error),
        (status = 403, description = "ROLE_USER missing", body = Error),
        (status = 404, description = "Unknown or foreign category", body = Error)
    ),
    tags = ["categories"],
    operation_id = "deleteCategory"
)]
#[delete("/category/delete/{id}")]
pub async fn delete_category(
    state: web::Data<HttpState>,
    current: CurrentUser,
    id: web::Path<String>,
    form: Option<web::Form<DeleteForm>>,
) -> ApiResult<HttpResponse> {
    let category = resolve(&state, &current, &id).await?;
    let submitted = form.and_then(|form| form.into_inner().token);
    let verdict = CsrfTokens::new(current.session())
        .verify(&CsrfScope::delete(category.id()), submitted.as_deref())?;
    state
        .category_commands
        .delete(current.user(), &category, verdict)
        .await?;
    Ok(see_other(INDEX))
}

#[cfg(test)]
#[path = "categories_tests.rs"]
mod tests;
