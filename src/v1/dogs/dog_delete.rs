#![forbid(unsafe_code)]

use std::sync::Arc;

use poem_openapi::{ OpenApi, param::Path, ApiResponse };
use log::info;

use crate::utils::app_state::AppState;
use crate::utils::hx_utils::SELECTION_CHANGE;

// ***************************************************************************
//                          Request/Response Definiions
// ***************************************************************************
pub struct DeleteDogApi {
    pub state: Arc<AppState>,
}

// ------------------- HTTP Status Codes -------------------
// An empty 200 body lets htmx remove the row.  The trigger header is only
// sent when the deleted dog was being edited.
#[derive(Debug, ApiResponse)]
enum HxResponse {
    #[oai(status = 200)]
    Http200(#[oai(header = "HX-Trigger")] Option<String>),
}

// ***************************************************************************
//                             OpenAPI Endpoint
// ***************************************************************************
#[OpenApi]
impl DeleteDogApi {
    #[oai(path = "/dog/:id", method = "delete")]
    async fn delete_dog(&self, id: Path<String>) -> HxResponse {
        let deleted = self.state.store.delete(&id);
        let msg =
            if deleted {format!("Dog {} deleted", id.0)}
            else {format!("Dog {} NOT FOUND - Nothing deleted", id.0)};
        info!("{}", msg);

        // Don't leave the form editing a dog that no longer exists.
        if self.state.selection.clear_if(&id) {
            info!("Selection of deleted dog {} cleared.", id.0);
            return HxResponse::Http200(Some(SELECTION_CHANGE.to_string()));
        }
        HxResponse::Http200(None)
    }
}
