//! Single binary web server: HTML screens rendered server-side, static from /static, API via REST.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default. See `config` for the environment variables.

use actix_files::Files;
use actix_session::{
    config::PersistentSession, storage::CookieSessionStore, Session as CookieSession,
    SessionMiddleware,
};
use actix_web::{
    cookie::{time::Duration as CookieDuration, Key},
    get,
    http::header,
    post,
    web::{Data, Form, Json, Path, ServiceConfig},
    App, HttpResponse, HttpServer, Responder,
};
use billiards_scoreboard_web::{
    config::ServerConfig,
    export::{standings_csv, standings_filename},
    view::{render_page, render_setup, wrap_page, SetupAction, SetupDraft},
    EndMatchPolicy, FileSlotStore, PlayerId, Scoreboard, Session, SessionError, SlotStore,
    Stats, STORAGE_KEY,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};
use std::time::{Duration, Instant};
use uuid::Uuid;

/// Browser identity, kept in the signed cookie.
type ClientId = Uuid;

const CLIENT_ID_KEY: &str = "client_id";

/// Per-browser entry: loaded scoreboard + last activity time (for eviction from memory).
struct ScoreboardEntry {
    scoreboard: Scoreboard,
    last_activity: Instant,
}

/// Each entry has its own lock; the map lock is only held to find or insert one.
struct AppData {
    store: Arc<dyn SlotStore>,
    scoreboards: RwLock<HashMap<ClientId, Arc<Mutex<ScoreboardEntry>>>>,
    end_match_policy: EndMatchPolicy,
}

impl AppData {
    fn new(store: Arc<dyn SlotStore>, end_match_policy: EndMatchPolicy) -> Self {
        Self {
            store,
            scoreboards: RwLock::new(HashMap::new()),
            end_match_policy,
        }
    }
}

type AppState = Data<AppData>;

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Serialize)]
struct ScoreResponse<'a> {
    changed: bool,
    session: &'a Session,
    stats: Stats,
}

#[derive(Deserialize)]
struct StartMatchBody {
    names: Vec<String>,
}

#[derive(Deserialize)]
struct ScoreBody {
    player_id: PlayerId,
}

/// Form field posted by the +/- buttons on a matchup card.
#[derive(Deserialize)]
struct ScoreForm {
    player: PlayerId,
}

/// Path segment: matchup id (e.g. /matchups/{id}/increment)
#[derive(Deserialize)]
struct MatchupPath {
    id: String,
}

fn slot_key(client: ClientId) -> String {
    format!("{}-{}", STORAGE_KEY, client)
}

/// Client id from the cookie, assigning a fresh one on first visit.
fn client_id(cookie: &CookieSession) -> Result<ClientId, HttpResponse> {
    match cookie.get::<ClientId>(CLIENT_ID_KEY) {
        Ok(Some(id)) => return Ok(id),
        Ok(None) => {}
        Err(e) => log::warn!("Unreadable client cookie, assigning a new id: {}", e),
    }
    let id = Uuid::new_v4();
    cookie.insert(CLIENT_ID_KEY, id).map_err(|e| {
        log::error!("Could not set client cookie: {}", e);
        HttpResponse::InternalServerError().body("session error")
    })?;
    log::info!("New client {}", id);
    Ok(id)
}

fn lock_error() -> HttpResponse {
    HttpResponse::InternalServerError().body("lock error")
}

/// The client's entry, loading it from its slot on first use.
fn scoreboard_entry(
    state: &AppState,
    client: ClientId,
) -> Result<Arc<Mutex<ScoreboardEntry>>, HttpResponse> {
    if let Some(entry) = state.scoreboards.read().map_err(|_| lock_error())?.get(&client) {
        return Ok(entry.clone());
    }
    // Slot is read before taking the map lock so other clients aren't held up.
    let scoreboard = Scoreboard::open(state.store.clone(), slot_key(client));
    log::debug!("Loaded scoreboard from slot {}", scoreboard.key());
    let mut g = state.scoreboards.write().map_err(|_| lock_error())?;
    let entry = g.entry(client).or_insert_with(|| {
        Arc::new(Mutex::new(ScoreboardEntry {
            scoreboard,
            last_activity: Instant::now(),
        }))
    });
    Ok(entry.clone())
}

/// Run `f` on the caller's scoreboard.
fn with_scoreboard<R>(
    state: &AppState,
    cookie: &CookieSession,
    f: impl FnOnce(&mut Scoreboard) -> R,
) -> Result<R, HttpResponse> {
    let client = client_id(cookie)?;
    let entry = scoreboard_entry(state, client)?;
    let mut entry = entry.lock().map_err(|_| lock_error())?;
    entry.last_activity = Instant::now();
    Ok(f(&mut entry.scoreboard))
}

fn see_other_home() -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, "/"))
        .finish()
}

fn html(body: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(body)
}

fn bad_request(e: SessionError) -> HttpResponse {
    HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() }))
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "billiards-scoreboard-web",
    })
}

/// Avoid 404 in browser tab: favicon not required for app logic.
#[get("/favicon.ico")]
async fn favicon() -> HttpResponse {
    HttpResponse::NoContent().finish()
}

/// Setup screen or scoreboard, depending on the session status.
#[get("/")]
async fn index(state: AppState, cookie: CookieSession) -> HttpResponse {
    match with_scoreboard(&state, &cookie, |sb| render_page(sb.session(), &sb.stats())) {
        Ok(page) => html(page),
        Err(resp) => resp,
    }
}

/// Setup form: change the roster size (keeping typed names) or start the match.
#[post("/setup")]
async fn setup_submit(
    state: AppState,
    cookie: CookieSession,
    form: Form<HashMap<String, String>>,
) -> HttpResponse {
    let mut draft = SetupDraft::from_form(&form);
    let action = SetupAction::parse(form.get("action").map(String::as_str));
    if action != SetupAction::Start {
        draft.resize(action);
        return html(wrap_page(&render_setup(&draft, None)));
    }
    let result = with_scoreboard(&state, &cookie, |sb| sb.start_match(draft.names.as_slice()));
    match result {
        Ok(Ok(())) => see_other_home(),
        // Already playing (e.g. a second tab): just show the scoreboard.
        Ok(Err(SessionError::InvalidTransition { .. })) => see_other_home(),
        Ok(Err(e)) => HttpResponse::BadRequest()
            .content_type("text/html; charset=utf-8")
            .body(wrap_page(&render_setup(&draft, Some(&e.to_string())))),
        Err(resp) => resp,
    }
}

/// Tap on a player's side: +1.
#[post("/matchups/{id}/increment")]
async fn matchup_increment(
    state: AppState,
    cookie: CookieSession,
    path: Path<MatchupPath>,
    form: Form<ScoreForm>,
) -> HttpResponse {
    match with_scoreboard(&state, &cookie, |sb| sb.increment_score(&path.id, form.player)) {
        Ok(changed) => {
            if !changed {
                log::debug!("Ignored +1 for player {} in matchup {}", form.player, path.id);
            }
            see_other_home()
        }
        Err(resp) => resp,
    }
}

/// Minus button on a player's side: -1, never below zero.
#[post("/matchups/{id}/decrement")]
async fn matchup_decrement(
    state: AppState,
    cookie: CookieSession,
    path: Path<MatchupPath>,
    form: Form<ScoreForm>,
) -> HttpResponse {
    match with_scoreboard(&state, &cookie, |sb| sb.decrement_score(&path.id, form.player)) {
        Ok(changed) => {
            if !changed {
                log::debug!("Ignored -1 for player {} in matchup {}", form.player, path.id);
            }
            see_other_home()
        }
        Err(resp) => resp,
    }
}

#[post("/scores/reset")]
async fn scores_reset(state: AppState, cookie: CookieSession) -> HttpResponse {
    match with_scoreboard(&state, &cookie, |sb| sb.reset_scores()) {
        Ok(()) => see_other_home(),
        Err(resp) => resp,
    }
}

#[post("/match/end")]
async fn match_end(state: AppState, cookie: CookieSession) -> HttpResponse {
    let policy = state.end_match_policy;
    match with_scoreboard(&state, &cookie, |sb| sb.end_match(policy)) {
        Ok(Ok(())) => see_other_home(),
        Ok(Err(e)) => {
            log::debug!("End match ignored: {}", e);
            see_other_home()
        }
        Err(resp) => resp,
    }
}

/// Ranking as a CSV download.
#[get("/export/standings.csv")]
async fn export_standings(state: AppState, cookie: CookieSession) -> HttpResponse {
    let stats = match with_scoreboard(&state, &cookie, |sb| sb.stats()) {
        Ok(stats) => stats,
        Err(resp) => return resp,
    };
    match standings_csv(&stats) {
        Ok(body) => {
            let filename = standings_filename(&chrono::Local::now());
            HttpResponse::Ok()
                .content_type("text/csv; charset=utf-8")
                .insert_header((
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", filename),
                ))
                .body(body)
        }
        Err(e) => {
            log::error!("CSV export failed: {}", e);
            HttpResponse::InternalServerError().body("export failed")
        }
    }
}

/// Current session (players, matchups, status).
#[get("/api/session")]
async fn api_get_session(state: AppState, cookie: CookieSession) -> HttpResponse {
    match with_scoreboard(&state, &cookie, |sb| HttpResponse::Ok().json(sb.session())) {
        Ok(resp) | Err(resp) => resp,
    }
}

/// Total games and ranking.
#[get("/api/stats")]
async fn api_get_stats(state: AppState, cookie: CookieSession) -> HttpResponse {
    match with_scoreboard(&state, &cookie, |sb| HttpResponse::Ok().json(sb.stats())) {
        Ok(resp) | Err(resp) => resp,
    }
}

/// Commit the roster and start scoring (Setup -> Playing).
#[post("/api/match/start")]
async fn api_start_match(
    state: AppState,
    cookie: CookieSession,
    body: Json<StartMatchBody>,
) -> HttpResponse {
    let result = with_scoreboard(&state, &cookie, |sb| match sb.start_match(body.names.as_slice()) {
        Ok(()) => HttpResponse::Ok().json(sb.session()),
        Err(e) => bad_request(e),
    });
    match result {
        Ok(resp) | Err(resp) => resp,
    }
}

/// Back to setup (Playing -> Setup).
#[post("/api/match/end")]
async fn api_end_match(state: AppState, cookie: CookieSession) -> HttpResponse {
    let policy = state.end_match_policy;
    let result = with_scoreboard(&state, &cookie, |sb| match sb.end_match(policy) {
        Ok(()) => HttpResponse::Ok().json(sb.session()),
        Err(e) => bad_request(e),
    });
    match result {
        Ok(resp) | Err(resp) => resp,
    }
}

#[post("/api/scores/reset")]
async fn api_reset_scores(state: AppState, cookie: CookieSession) -> HttpResponse {
    let result = with_scoreboard(&state, &cookie, |sb| {
        sb.reset_scores();
        HttpResponse::Ok().json(sb.session())
    });
    match result {
        Ok(resp) | Err(resp) => resp,
    }
}

#[post("/api/matchups/{id}/increment")]
async fn api_increment(
    state: AppState,
    cookie: CookieSession,
    path: Path<MatchupPath>,
    body: Json<ScoreBody>,
) -> HttpResponse {
    let result = with_scoreboard(&state, &cookie, |sb| {
        let changed = sb.increment_score(&path.id, body.player_id);
        HttpResponse::Ok().json(ScoreResponse {
            changed,
            session: sb.session(),
            stats: sb.stats(),
        })
    });
    match result {
        Ok(resp) | Err(resp) => resp,
    }
}

#[post("/api/matchups/{id}/decrement")]
async fn api_decrement(
    state: AppState,
    cookie: CookieSession,
    path: Path<MatchupPath>,
    body: Json<ScoreBody>,
) -> HttpResponse {
    let result = with_scoreboard(&state, &cookie, |sb| {
        let changed = sb.decrement_score(&path.id, body.player_id);
        HttpResponse::Ok().json(ScoreResponse {
            changed,
            session: sb.session(),
            stats: sb.stats(),
        })
    });
    match result {
        Ok(resp) | Err(resp) => resp,
    }
}

fn session_middleware(key: Key) -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("scoreboard".to_string())
        .cookie_secure(false)
        .session_lifecycle(PersistentSession::default().session_ttl(CookieDuration::days(365)))
        .build()
}

/// All routes except static files.
fn configure(cfg: &mut ServiceConfig) {
    cfg.service(index)
        .service(api_health)
        .service(favicon)
        .service(setup_submit)
        .service(matchup_increment)
        .service(matchup_decrement)
        .service(scores_reset)
        .service(match_end)
        .service(export_standings)
        .service(api_get_session)
        .service(api_get_stats)
        .service(api_start_match)
        .service(api_end_match)
        .service(api_reset_scores)
        .service(api_increment)
        .service(api_decrement);
}

fn session_key(config: &ServerConfig) -> Key {
    match &config.session_secret {
        Some(secret) => Key::derive_from(secret.as_bytes()),
        None => {
            log::warn!("SESSION_SECRET not set; scoreboards will not be found again after a restart");
            Key::generate()
        }
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = ServerConfig::from_env()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;
    let store = FileSlotStore::open(config.data_dir.clone())
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
    log::info!("Storing scoreboards in {}", store.dir().display());

    let key = session_key(&config);
    let idle_timeout = config.idle_timeout;
    let state = Data::new(AppData::new(Arc::new(store), config.end_match_policy));

    // Background task: every 30 minutes, drop idle scoreboards from memory (they stay in their slots)
    let state_cleanup = state.clone();
    actix_web::rt::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(30 * 60));
        loop {
            interval.tick().await;
            let mut g = match state_cleanup.scoreboards.write() {
                Ok(guard) => guard,
                Err(_) => continue,
            };
            let before = g.len();
            // A poisoned entry is dropped too; it reloads from its slot on next use.
            g.retain(|_, entry| {
                entry
                    .lock()
                    .map(|e| e.last_activity.elapsed() < idle_timeout)
                    .unwrap_or(false)
            });
            let removed = before - g.len();
            if removed > 0 {
                log::info!("Unloaded {} idle scoreboard(s)", removed);
            }
        }
    });

    let bind = (config.host.clone(), config.port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(session_middleware(key.clone()))
            .configure(configure)
            .service(Files::new("/static", "static"))
    })
    .bind(bind)?
    .run()
    .await
}
