#![forbid(unsafe_code)]

use std::sync::Arc;

use poem_openapi::{ OpenApi, payload::{Html, PlainText}, ApiResponse };
use anyhow::Result;
use log::{debug, error};

use crate::utils::app_state::AppState;
use crate::utils::templates::render_rows;

// ***************************************************************************
//                          Request/Response Definiions
// ***************************************************************************
pub struct ListRowsApi {
    pub state: Arc<AppState>,
}

// ------------------- HTTP Status Codes -------------------
#[derive(Debug, ApiResponse)]
enum HxResponse {
    #[oai(status = 200)]
    Http200(Html<String>),
    #[oai(status = 500)]
    Http500(PlainText<String>),
}

fn make_http_200(rows: String) -> HxResponse {
    HxResponse::Http200(Html(rows))
}
fn make_http_500(msg: String) -> HxResponse {
    HxResponse::Http500(PlainText(msg))
}

// ***************************************************************************
//                             OpenAPI Endpoint
// ***************************************************************************
#[OpenApi]
impl ListRowsApi {
    #[oai(path = "/rows", method = "get")]
    async fn list_rows(&self) -> HxResponse {
        match process(&self.state) {
            Ok(r) => r,
            Err(e) => {
                let msg = "ERROR: ".to_owned() + e.to_string().as_str();
                error!("{}", msg);
                make_http_500(msg)
            }
        }
    }
}

// ***************************************************************************
//                          Private Functions
// ***************************************************************************
fn process(state: &AppState) -> Result<HxResponse> {
    let dogs = state.store.list();
    debug!("Listing {} dogs.", dogs.len());
    Ok(make_http_200(render_rows(&dogs)?))
}
