#![forbid(unsafe_code)]

use poem_openapi::{ OpenApi, payload::PlainText };

// From cargo.toml.
const HXDEMO_VERSION: Option<&str> = option_env!("CARGO_PKG_VERSION");

// ***************************************************************************
//                          Request/Response Definiions
// ***************************************************************************
pub struct VersionApi;

// ***************************************************************************
//                             OpenAPI Endpoint
// ***************************************************************************
#[OpenApi]
impl VersionApi {
    #[oai(path = "/version", method = "get")]
    async fn get_version(&self) -> PlainText<String> {
        PlainText(version_string())
    }
}

// ---------------------------------------------------------------------------
// version_string:
// ---------------------------------------------------------------------------
/** The server and runtime versions, e.g. "hxdemo_server 0.1.0 (rustc 1.80.0)". */
pub fn version_string() -> String {
    format!("hxdemo_server {} ({})", HXDEMO_VERSION.unwrap_or("unknown"), env!("RUSTC_VERSION"))
}
