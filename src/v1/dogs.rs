#![forbid(unsafe_code)]

use std::sync::Arc;

use crate::utils::app_state::AppState;

pub mod dog_create;
pub mod dog_delete;
pub mod dog_deselect;
pub mod dog_select;
pub mod dog_update;
pub mod form_get;
pub mod rows_list;
pub mod version;

use dog_create::CreateDogApi;
use dog_delete::DeleteDogApi;
use dog_deselect::DeselectDogApi;
use dog_select::SelectDogApi;
use dog_update::UpdateDogApi;
use form_get::GetFormApi;
use rows_list::ListRowsApi;
use version::VersionApi;

// Every endpoint of the dogs page, each sharing the same application state.
pub type DogEndpoints = (ListRowsApi, CreateDogApi, SelectDogApi, UpdateDogApi,
                         DeselectDogApi, DeleteDogApi, GetFormApi, VersionApi);

// ---------------------------------------------------------------------------
// endpoints:
// ---------------------------------------------------------------------------
pub fn endpoints(state: &Arc<AppState>) -> DogEndpoints {
    (
        ListRowsApi {state: state.clone()},
        CreateDogApi {state: state.clone()},
        SelectDogApi {state: state.clone()},
        UpdateDogApi {state: state.clone()},
        DeselectDogApi {state: state.clone()},
        DeleteDogApi {state: state.clone()},
        GetFormApi {state: state.clone()},
        VersionApi,
    )
}

// ***************************************************************************
//                               Test Support
// ***************************************************************************
#[cfg(test)]
pub fn test_client(seed: bool) -> (poem::test::TestClient<impl poem::Endpoint>, Arc<AppState>) {
    let state = if seed {AppState::new_seeded()} else {AppState::new()};
    let app = crate::make_app(state.clone(), &crate::utils::config::Config::new());
    (poem::test::TestClient::new(app), state)
}

// ***************************************************************************
//                                  Tests
// ***************************************************************************
#[cfg(test)]
mod tests {
    use super::test_client;
    use crate::utils::selection::Selection;

    async fn body_of(resp: poem::test::TestResponse) -> String {
        resp.0.into_body().into_string().await.unwrap()
    }

    #[tokio::test]
    async fn comet_oscar_birdie_walkthrough() {
        let (cli, state) = test_client(true);

        // Two seeded rows, Comet first.
        let rows = body_of(cli.get("/v1/rows").send().await).await;
        assert_eq!(rows.matches("<tr").count(), 2);
        assert!(rows.find("Comet").unwrap() < rows.find("Oscar").unwrap());

        // Adding Birdie puts it at the top of the list.
        let resp = cli.post("/v1/dog")
            .form(&[("name", "Birdie"), ("breed", "Papillon")])
            .send()
            .await;
        resp.assert_status(poem::http::StatusCode::CREATED);
        let rows = body_of(cli.get("/v1/rows").send().await).await;
        assert_eq!(rows.matches("<tr").count(), 3);
        let birdie = rows.find("Birdie").unwrap();
        assert!(birdie < rows.find("Comet").unwrap());
        assert!(birdie < rows.find("Oscar").unwrap());

        // Every id is distinct.
        let dogs = state.store.list();
        let mut ids: Vec<&str> = dogs.iter().map(|d| d.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 3);

        // Selecting Comet switches the form to update mode.
        let comet = dogs.iter().find(|d| d.name == "Comet").unwrap().clone();
        cli.get(format!("/v1/select/{}", comet.id)).send().await.assert_status_is_ok();
        let form = body_of(cli.get("/v1/form").send().await).await;
        assert!(form.contains("value=\"Comet\""));
        assert!(form.contains("value=\"Whippet\""));
        assert!(form.contains(&format!("hx-put=\"/v1/dog/{}\"", comet.id)));

        // Updating Comet patches its row and ends the edit.
        let resp = cli.put(format!("/v1/dog/{}", comet.id))
            .form(&[("name", "Comet II"), ("breed", "Whippet")])
            .send()
            .await;
        resp.assert_status_is_ok();
        let row = body_of(resp).await;
        assert!(row.contains("<td>Comet II</td>"));
        assert!(row.contains("hx-swap-oob=\"true\""));
        assert_eq!(state.selection.current(), Selection::NoSelection);

        let form = body_of(cli.get("/v1/form").send().await).await;
        assert!(form.contains("hx-post=\"/v1/dog\""));
        assert!(!form.contains("Comet"));

        let rows = body_of(cli.get("/v1/rows").send().await).await;
        assert!(rows.contains("Comet II"));
        assert_eq!(rows.matches("<tr").count(), 3);
    }

    #[tokio::test]
    async fn static_index_served_at_root() {
        let (cli, _state) = test_client(false);
        let resp = cli.get("/").send().await;
        resp.assert_status_is_ok();
        let body = body_of(resp).await;
        assert!(body.contains("hx-get=\"/v1/rows\""));
        assert!(body.contains("selection-change from:body"));
    }
}
