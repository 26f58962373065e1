#![forbid(unsafe_code)]

use std::sync::Arc;

use poem_openapi::{ OpenApi, ApiResponse };
use log::info;

use crate::utils::app_state::AppState;
use crate::utils::hx_utils::SELECTION_CHANGE;

// ***************************************************************************
//                          Request/Response Definiions
// ***************************************************************************
pub struct DeselectDogApi {
    pub state: Arc<AppState>,
}

// ------------------- HTTP Status Codes -------------------
#[derive(Debug, ApiResponse)]
enum HxResponse {
    #[oai(status = 200)]
    Http200(#[oai(header = "HX-Trigger")] String),
}

// ***************************************************************************
//                             OpenAPI Endpoint
// ***************************************************************************
#[OpenApi]
impl DeselectDogApi {
    #[oai(path = "/deselect", method = "get")]
    async fn deselect_dog(&self) -> HxResponse {
        self.state.selection.clear();
        info!("Dog selection cleared.");
        HxResponse::Http200(SELECTION_CHANGE.to_string())
    }
}
