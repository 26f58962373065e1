#![forbid(unsafe_code)]

use std::sync::Arc;

use poem_openapi::{ OpenApi, param::Path, ApiResponse };
use log::info;

use crate::utils::app_state::AppState;
use crate::utils::hx_utils::SELECTION_CHANGE;

// ***************************************************************************
//                          Request/Response Definiions
// ***************************************************************************
pub struct SelectDogApi {
    pub state: Arc<AppState>,
}

// ------------------- HTTP Status Codes -------------------
// The body is empty; the header tells the page to reload the form.
#[derive(Debug, ApiResponse)]
enum HxResponse {
    #[oai(status = 200)]
    Http200(#[oai(header = "HX-Trigger")] String),
}

// ***************************************************************************
//                             OpenAPI Endpoint
// ***************************************************************************
#[OpenApi]
impl SelectDogApi {
    #[oai(path = "/select/:id", method = "get")]
    async fn select_dog(&self, id: Path<String>) -> HxResponse {
        // The id isn't checked against the store.
        self.state.selection.select(&id);
        info!("Dog {} selected for editing.", id.0);
        HxResponse::Http200(SELECTION_CHANGE.to_string())
    }
}

// ***************************************************************************
//                                  Tests
// ***************************************************************************
#[cfg(test)]
mod tests {
    use crate::utils::hx_utils::{HX_TRIGGER, SELECTION_CHANGE};
    use crate::utils::selection::Selection;
    use crate::v1::dogs::test_client;

    #[tokio::test]
    async fn select_sets_selection_and_notifies() {
        let (cli, state) = test_client(true);
        let comet = state.store.list().remove(0);

        let resp = cli.get(format!("/v1/select/{}", comet.id)).send().await;
        resp.assert_status_is_ok();
        resp.assert_header(HX_TRIGGER, SELECTION_CHANGE);
        resp.assert_text("").await;
        assert_eq!(state.selection.current(), Selection::Selected(comet.id));
    }

    #[tokio::test]
    async fn select_unknown_id_is_accepted() {
        let (cli, state) = test_client(false);
        let resp = cli.get("/v1/select/no-such-dog").send().await;
        resp.assert_status_is_ok();
        assert_eq!(state.selection.current(), Selection::Selected("no-such-dog".to_string()));
    }
}
