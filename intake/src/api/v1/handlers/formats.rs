use crate::api::v1::dto::FormatsResponse;
use crate::api::v1::response::ApiResponse;

/// `GET /api/v1/formats`
///
/// Lists the accepted file categories and their extensions. Clients use this
/// to build the file picker's accept list.
#[utoipa::path(
    get,
    path = "/api/v1/formats",
    tag = "files",
    operation_id = "formats.list",
    responses(
        (status = 200, description = "Supported file formats", body = FormatsResponse),
    )
)]
pub async fn list_formats() -> ApiResponse<FormatsResponse> {
    ApiResponse::success(FormatsResponse::supported())
}
