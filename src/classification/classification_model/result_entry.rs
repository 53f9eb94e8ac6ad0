use serde::Deserialize;

#[derive(Deserialize, Debug)]
pub struct ResultEntry {
    pub name: String,
}

#[derive(Deserialize, Debug)]
pub struct ResultsResponse {
    pub results: Vec<ResultEntry>,
}
