use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct RegisterRequest { pub email: String, pub name: String, pub password: String }

#[derive(ToSchema)]
pub struct LoginRequest { pub email: String, pub password: String }

#[derive(ToSchema)]
pub struct SearchRequestDoc { pub phrase: Option<String> }

/// `id` is only read on edit, where it must match the path id.
#[derive(ToSchema)]
pub struct JokeInputDoc {
    pub id: Option<i32>,
    pub question: String,
    pub answer: String,
    pub author: Option<String>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::auth::register,
        crate::routes::auth::login,
        crate::routes::auth::logout,
        crate::routes::auth::antiforgery_token,
        crate::routes::jokes::index,
        crate::routes::jokes::search_query,
        crate::routes::jokes::search,
        crate::routes::jokes::details,
        crate::routes::jokes::create_form,
        crate::routes::jokes::create,
        crate::routes::jokes::edit_form,
        crate::routes::jokes::edit,
        crate::routes::jokes::delete_confirm,
        crate::routes::jokes::delete_confirmed,
    ),
    components(
        schemas(
            HealthResponse,
            RegisterRequest,
            LoginRequest,
            SearchRequestDoc,
            JokeInputDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "auth"),
        (name = "jokes")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_id_routes_are_documented() {
        let doc = ApiDoc::openapi();
        for path in ["/jokes/details/{id}", "/jokes/edit/{id}", "/jokes/delete/{id}"] {
            assert!(doc.paths.paths.contains_key(path), "{path} missing from api doc");
        }
    }
}
