use actix_web::http::header;
use actix_web::HttpResponse;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct List<T> {
    list: Vec<T>,
    total: i64,
}

impl<T> List<T> {
    pub fn new(list: Vec<T>, total: i64) -> Self {
        List { list, total }
    }
}

pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::Found().insert_header((header::LOCATION, location)).finish()
}

pub fn redirect_with<T: Serialize>(path: &str, params: &T) -> HttpResponse {
    match serde_urlencoded::to_string(params) {
        Ok(query) if !query.is_empty() => redirect(&format!("{}?{}", path, query)),
        _ => redirect(path),
    }
}
