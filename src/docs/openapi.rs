use axum::{extract::State, Json};
use serde_json::json;
use utoipa::openapi::{
    path::{HttpMethod, OperationBuilder, ParameterBuilder, ParameterIn, PathItemBuilder},
    request_body::RequestBodyBuilder,
    schema::{ArrayBuilder, ObjectBuilder, Type},
    ComponentsBuilder, ContactBuilder, ContentBuilder, InfoBuilder, LicenseBuilder, OpenApi,
    OpenApiBuilder, PathsBuilder, Ref, Required, ResponseBuilder, ServerBuilder,
};

use crate::config::ProxyConfig;
use crate::http::server::AppState;

const JSON: &str = "application/json";

/// Serve the OpenAPI document built at startup.
pub async fn openapi_json(State(state): State<AppState>) -> Json<OpenApi> {
    Json(state.docs.as_ref().clone())
}

/// OpenAPI document for the post routes under the configured prefix.
pub fn document(config: &ProxyConfig) -> OpenApi {
    let prefix = config.routes.prefix.as_str();
    let port = config.listener.port().unwrap_or(5000);

    OpenApiBuilder::new()
        .info(
            InfoBuilder::new()
                .title("Blog Posts Proxy API")
                .version(env!("CARGO_PKG_VERSION"))
                .description(Some(
                    "CRUD passthrough for blog posts hosted by an upstream REST service.",
                ))
                .license(Some(
                    LicenseBuilder::new()
                        .name("MIT")
                        .url(Some("https://spdx.org/licenses/MIT.html"))
                        .build(),
                ))
                .contact(Some(
                    ContactBuilder::new()
                        .name(Some("Posts Proxy maintainers"))
                        .url(Some(config.upstream.base_url.as_str()))
                        .build(),
                ))
                .build(),
        )
        .servers(Some(vec![ServerBuilder::new()
            .url(format!("http://localhost:{port}"))
            .build()]))
        .paths(
            PathsBuilder::new()
                .path(
                    prefix,
                    PathItemBuilder::new()
                        .operation(HttpMethod::Get, list_operation())
                        .operation(HttpMethod::Post, create_operation())
                        .build(),
                )
                .path(
                    format!("{prefix}/{{id}}"),
                    PathItemBuilder::new()
                        .operation(HttpMethod::Get, read_operation())
                        .operation(HttpMethod::Put, update_operation())
                        .operation(HttpMethod::Delete, delete_operation())
                        .build(),
                ),
        )
        .components(Some(
            ComponentsBuilder::new()
                .schema("Post", post_schema())
                .schema(
                    "PostList",
                    success_schema().property("data", ArrayBuilder::new().items(Ref::from_schema_name("Post"))),
                )
                .schema(
                    "PostObject",
                    success_schema().property("data", Ref::from_schema_name("Post")),
                )
                .schema(
                    "Message",
                    success_schema().property(
                        "message",
                        ObjectBuilder::new()
                            .schema_type(Type::String)
                            .description(Some("Delete message"))
                            .examples([json!("Data deleted!")]),
                    ),
                )
                .schema(
                    "Failure",
                    ObjectBuilder::new()
                        .schema_type(Type::Object)
                        .property(
                            "status",
                            ObjectBuilder::new()
                                .schema_type(Type::String)
                                .examples([json!("Failed")]),
                        )
                        .property(
                            "message",
                            ObjectBuilder::new()
                                .schema_type(Type::String)
                                .description(Some("Why the upstream call failed")),
                        ),
                )
                .build(),
        ))
        .build()
}

fn post_schema() -> ObjectBuilder {
    ObjectBuilder::new()
        .schema_type(Type::Object)
        .property(
            "id",
            ObjectBuilder::new()
                .schema_type(Type::Integer)
                .description(Some("Post ID."))
                .examples([json!(1)]),
        )
        .property(
            "userId",
            ObjectBuilder::new()
                .schema_type(Type::Integer)
                .description(Some("Author ID."))
                .examples([json!(1)]),
        )
        .property(
            "title",
            ObjectBuilder::new()
                .schema_type(Type::String)
                .description(Some("Post title."))
                .examples([json!("sunt aut facere repellat provident occaecati")]),
        )
        .property(
            "body",
            ObjectBuilder::new()
                .schema_type(Type::String)
                .description(Some("Post body."))
                .examples([json!("quia et suscipit\nsuscipit recusandae consequuntur")]),
        )
}

fn success_schema() -> ObjectBuilder {
    ObjectBuilder::new().schema_type(Type::Object).property(
        "status",
        ObjectBuilder::new()
            .schema_type(Type::String)
            .description(Some("Shows the status of the request"))
            .examples([json!("Successful")]),
    )
}

fn json_response(description: &str, schema: &str) -> utoipa::openapi::Response {
    ResponseBuilder::new()
        .description(description)
        .content(
            JSON,
            ContentBuilder::new()
                .schema(Some(Ref::from_schema_name(schema)))
                .build(),
        )
        .build()
}

fn failure_response() -> utoipa::openapi::Response {
    json_response("Upstream failure, relayed or mapped to 502.", "Failure")
}

fn id_parameter(action: &str) -> utoipa::openapi::path::Parameter {
    ParameterBuilder::new()
        .name("id")
        .parameter_in(ParameterIn::Path)
        .required(Required::True)
        .description(Some(format!("ID of the blog post to {action}.")))
        .schema(Some(ObjectBuilder::new().schema_type(Type::Integer)))
        .build()
}

fn post_body() -> utoipa::openapi::request_body::RequestBody {
    RequestBodyBuilder::new()
        .description(Some("Post payload, forwarded unchanged."))
        .content(
            JSON,
            ContentBuilder::new()
                .schema(Some(Ref::from_schema_name("Post")))
                .build(),
        )
        .build()
}

fn list_operation() -> utoipa::openapi::path::Operation {
    OperationBuilder::new()
        .summary(Some("Fetch blog posts from the upstream."))
        .description(Some("Returns a list of all blog posts."))
        .response("200", json_response("A list of blog posts.", "PostList"))
        .response("default", failure_response())
        .build()
}

fn create_operation() -> utoipa::openapi::path::Operation {
    OperationBuilder::new()
        .summary(Some("Create a blog post."))
        .request_body(Some(post_body()))
        .response("200", json_response("Newly created blog post.", "PostObject"))
        .response("default", failure_response())
        .build()
}

fn read_operation() -> utoipa::openapi::path::Operation {
    OperationBuilder::new()
        .summary(Some("Fetch a blog post."))
        .description(Some("Returns a blog post object."))
        .parameter(id_parameter("fetch"))
        .response("200", json_response("A single blog post.", "PostObject"))
        .response("default", failure_response())
        .build()
}

fn update_operation() -> utoipa::openapi::path::Operation {
    OperationBuilder::new()
        .summary(Some("Update a blog post."))
        .description(Some("Returns an updated blog post."))
        .parameter(id_parameter("update"))
        .request_body(Some(post_body()))
        .response("200", json_response("Updated blog post.", "PostObject"))
        .response("default", failure_response())
        .build()
}

fn delete_operation() -> utoipa::openapi::path::Operation {
    OperationBuilder::new()
        .summary(Some("Delete a blog post."))
        .description(Some("Returns a message for the delete operation."))
        .parameter(id_parameter("delete"))
        .response("200", json_response("An object with status and message properties.", "Message"))
        .response("default", failure_response())
        .build()
}
