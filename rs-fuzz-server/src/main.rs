use actix_cors::Cors;
use actix_web::http::StatusCode;
use actix_web::{App, HttpResponse, HttpServer, ResponseError, delete, get, middleware, post, web};
use clap::Parser;
use serde::Deserialize;
use serde_json::{Value, json};
use thiserror::Error;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use rs_fuzz_core::{CharNgram, DEFAULT_NGRAM_SIZE, KeyBy, MatchOptions, NgramError, NgramProfile, ReturnScope, Scoring};

/// HTTP front end for character n-gram matching.
#[derive(Parser, Debug)]
#[command(name = "rs-fuzz-server", version, about)]
struct Cli {
	/// Address to bind
	#[arg(long, default_value = "127.0.0.1")]
	host: String,

	/// Port to listen on
	#[arg(short, long, default_value_t = 5000)]
	port: u16,

	/// Enable debug logging
	#[arg(short, long)]
	verbose: bool,
}

/// Error returned by the handlers, rendered as `400 {"error": "..."}`.
#[derive(Debug, Error)]
enum ApiError {
	/// Rejected by the matcher
	#[error(transparent)]
	Ngram(#[from] NgramError),

	/// Query string or JSON body could not be extracted
	#[error("malformed request: {0}")]
	Malformed(String),
}

impl ResponseError for ApiError {
	fn status_code(&self) -> StatusCode {
		StatusCode::BAD_REQUEST
	}

	fn error_response(&self) -> HttpResponse {
		warn!(error = %self, "rejected request");
		HttpResponse::build(self.status_code()).json(json!({ "error": self.to_string() }))
	}
}

/// Converts a requested n-gram size, treating anything below 1 as 1.
fn ngram_size(n: i64) -> usize {
	usize::try_from(n.max(1)).unwrap_or(usize::MAX)
}

/// Query parameters for the `/v1/compare` endpoint
#[derive(Deserialize)]
struct CompareParams {
	reference: String,
	input: String,
	scoring: Option<String>,
	n: Option<i64>,
}

/// JSON body shared by the list endpoints.
///
/// Candidates and input are kept as raw JSON values so that non-string
/// entries are reported as invalid input instead of a generic parse error.
#[derive(Deserialize)]
struct ListRequest {
	candidates: Vec<Value>,
	input: Value,
	scoring: Option<String>,
	n: Option<i64>,
	key_by: Option<String>,
	scope: Option<String>,
}

impl ListRequest {
	/// Builds the match options, rejecting unknown selector values.
	fn options(&self) -> Result<MatchOptions, NgramError> {
		let mut options = MatchOptions::default();
		if let Some(scoring) = &self.scoring {
			options.scoring = scoring.parse::<Scoring>()?;
		}
		if let Some(n) = self.n {
			options.ngram_size = ngram_size(n);
		}
		if let Some(key_by) = &self.key_by {
			options.key_by = key_by.parse::<KeyBy>()?;
		}
		if let Some(scope) = &self.scope {
			options.scope = scope.parse::<ReturnScope>()?;
		}
		Ok(options)
	}

	fn input(&self) -> Result<&str, NgramError> {
		text(&self.input, "input")
	}

	fn candidates(&self) -> Result<Vec<&str>, NgramError> {
		self.candidates
			.iter()
			.enumerate()
			.map(|(index, value)| text(value, &format!("candidates[{index}]")))
			.collect()
	}
}

/// Reads a JSON value that must be a string.
///
/// Raw request bodies go through `NgramProfile::from_utf8` instead, which
/// reports invalid text with the same `NgramError::InvalidInput` kind.
fn text<'a>(value: &'a Value, field: &str) -> Result<&'a str, NgramError> {
	value
		.as_str()
		.ok_or_else(|| NgramError::InvalidInput(format!("{field} must be a string, got {value}")))
}

/// HTTP GET endpoint `/v1/compare`
///
/// Scores `input` against `reference`.
#[get("/v1/compare")]
async fn get_compare(matcher: web::Data<CharNgram>, query: web::Query<CompareParams>) -> Result<HttpResponse, ApiError> {
	let mut options = MatchOptions::default();
	if let Some(scoring) = &query.scoring {
		options.scoring = scoring.parse()?;
	}
	if let Some(n) = query.n {
		options.ngram_size = ngram_size(n);
	}

	let score = matcher.compare_string(&query.reference, &query.input, &options);
	Ok(HttpResponse::Ok().json(json!({ "score": score })))
}

/// HTTP POST endpoint `/v1/compare_list`
///
/// Returns the ranked `[{"key", "score"}]` entries.
#[post("/v1/compare_list")]
async fn post_compare_list(matcher: web::Data<CharNgram>, body: web::Json<ListRequest>) -> Result<HttpResponse, ApiError> {
	let options = body.options()?;
	let entries = matcher.compare_list(&body.candidates()?, body.input()?, &options)?;
	Ok(HttpResponse::Ok().json(entries))
}

#[post("/v1/best_match")]
async fn post_best_match(matcher: web::Data<CharNgram>, body: web::Json<ListRequest>) -> Result<HttpResponse, ApiError> {
	let options = body.options()?;
	let best = matcher.best_match(&body.candidates()?, body.input()?, &options)?;
	Ok(HttpResponse::Ok().json(json!({ "match": best })))
}

#[post("/v1/best_match_index")]
async fn post_best_match_index(matcher: web::Data<CharNgram>, body: web::Json<ListRequest>) -> Result<HttpResponse, ApiError> {
	let options = body.options()?;
	let best = matcher.best_match_index(&body.candidates()?, body.input()?, &options)?;
	Ok(HttpResponse::Ok().json(json!({ "index": best })))
}

/// Query parameters for the `/v1/profile` endpoint
#[derive(Deserialize)]
struct ProfileParams {
	n: Option<i64>,
}

/// HTTP POST endpoint `/v1/profile`
///
/// Returns the n-gram profile of the raw request body, which must be UTF-8.
#[post("/v1/profile")]
async fn post_profile(query: web::Query<ProfileParams>, body: web::Bytes) -> Result<HttpResponse, ApiError> {
	let n = query.n.map_or(DEFAULT_NGRAM_SIZE, ngram_size);
	let profile = NgramProfile::from_utf8(&body, n)?;
	Ok(HttpResponse::Ok().json(profile))
}

/// Number of cached profiles.
#[get("/v1/cache")]
async fn get_cache(matcher: web::Data<CharNgram>) -> HttpResponse {
	HttpResponse::Ok().json(json!({ "entries": matcher.cache().len() }))
}

#[delete("/v1/cache")]
async fn delete_cache(matcher: web::Data<CharNgram>) -> HttpResponse {
	let entries = matcher.cache().len();
	matcher.cache().clear();
	info!(entries, "cleared ngram cache");
	HttpResponse::Ok().json(json!({ "cleared": entries }))
}

/// Registers every endpoint.
///
/// Extractor failures are turned into `ApiError` so every rejection has
/// the same JSON body.
fn configure(cfg: &mut web::ServiceConfig) {
	cfg.app_data(
		web::QueryConfig::default().error_handler(|err, _req| ApiError::Malformed(err.to_string()).into()),
	)
	.app_data(web::JsonConfig::default().error_handler(|err, _req| ApiError::Malformed(err.to_string()).into()))
	.service(get_compare)
	.service(post_compare_list)
	.service(post_best_match)
	.service(post_best_match_index)
	.service(post_profile)
	.service(get_cache)
	.service(delete_cache);
}

/// Main entry point for the server.
///
/// Creates one `CharNgram` shared by every worker. The matcher guards its
/// cache internally, so no outer lock is needed.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
	let cli = Cli::parse();

	let filter = if cli.verbose {
		EnvFilter::new("rs_fuzz=debug,info")
	} else {
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
	};
	tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

	let matcher = web::Data::new(CharNgram::new());

	info!(host = %cli.host, port = cli.port, "starting rs-fuzz server");
	HttpServer::new(move || {
		App::new()
			.wrap(middleware::Logger::default())
			.wrap(Cors::permissive())
			.app_data(matcher.clone())
			.configure(configure)
	})
		.bind((cli.host.as_str(), cli.port))?
		.run()
		.await
}
