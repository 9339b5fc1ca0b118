use std::sync::RwLock;

use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{get, put, web, App, HttpResponse, HttpServer, Responder};

use serde::Deserialize;
use rs_markov_core::model::markov_model::MarkovModel;
use rs_markov_core::scan::scan_words;

/// Struct representing query parameters for the `/v1/build` endpoint
#[derive(Deserialize)]
struct BuildParams {
	prefix_len: Option<usize>
}

/// Struct representing query parameters for the `/v1/generate` endpoint
#[derive(Deserialize)]
struct GenerateParams {
	limit: Option<usize>,
	delim: Option<String>
}

struct SharedData {
	model: Option<MarkovModel>
}

/// HTTP PUT endpoint `/v1/build`
///
/// Builds a fresh model from the request body (the raw training corpus,
/// word-split) and installs it, replacing any previous model. Rebuild
/// takes the write lock, so in-flight generation is never torn.
#[put("/v1/build")]
async fn put_build(data: web::Data<RwLock<SharedData>>, query: web::Query<BuildParams>, body: String) -> impl Responder {
	let prefix_len = query.prefix_len.unwrap_or(2);

	let model = match MarkovModel::build(body.as_bytes(), prefix_len, scan_words) {
		Ok(m) => m,
		Err(e) => return HttpResponse::BadRequest().body(e.to_string())
	};

	let mut shared_data = match data.write() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};
	shared_data.model = Some(model);

	HttpResponse::Ok().body("Model built successfully")
}

/// HTTP GET endpoint `/v1/generate`
///
/// Generates one chain from the current model based on query parameters.
/// Returns the generated sequence as the response body.
#[get("/v1/generate")]
async fn get_generated(data: web::Data<RwLock<SharedData>>, query: web::Query<GenerateParams>) -> impl Responder {
	let limit = query.limit.unwrap_or(32);
	let delim = query.delim.as_deref().unwrap_or(" ");

	let shared_data = match data.read() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};

	let model = match &shared_data.model {
		Some(m) => m,
		None => return HttpResponse::BadRequest().body("No model built yet"),
	};

	match model.generate_delimited(limit, delim) {
		Ok(result) => HttpResponse::Ok().body(result),
		Err(e) => HttpResponse::BadRequest().body(e.to_string()),
	}
}

/// HTTP GET endpoint `/v1/stats`
///
/// Reports the prefix length and table size of the current model.
#[get("/v1/stats")]
async fn get_stats(data: web::Data<RwLock<SharedData>>) -> impl Responder {
	let shared_data = match data.read() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};

	match &shared_data.model {
		Some(m) => HttpResponse::Ok()
			.body(format!("prefix_len: {}\nprefixes: {}", m.prefix_len(), m.len())),
		None => HttpResponse::BadRequest().body("No model built yet"),
	}
}

/// Main entry point for the server.
///
/// Holds the model behind a `RwLock` so rebuilds are serialized against
/// concurrent generation reads, and starts an Actix-web HTTP server.
///
/// # Notes
/// - The server binds to 127.0.0.1:5000.
/// - The server starts without a model; PUT /v1/build installs one.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
	env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

	let shared_data = SharedData {
		model: None,
	};
	let shared_model = web::Data::new(RwLock::new(shared_data));

	HttpServer::new(move || {
		App::new()
			.app_data(shared_model.clone())
			.wrap(Logger::default())
			.wrap(Cors::permissive())
			.service(put_build)
			.service(get_generated)
			.service(get_stats)
	})
		.bind(("127.0.0.1", 5000))?
		.run()
		.await
}
