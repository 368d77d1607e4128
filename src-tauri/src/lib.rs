// Module declarations
pub mod api;
pub mod completion;
pub mod config;
pub mod error;
pub mod fallback;
pub mod generator;
pub mod models;
pub mod paths;
pub mod prompts;
pub mod reveal;
pub mod scene;
pub mod themes;
pub mod view;

use api::API_SCHEME;
use completion::OpenRouterClient;
use config::{load_completion_config, save_completion_config, CompletionConfig};
use error::GenerationError;
use generator::generate_code_with_config;
use models::{GenerationOutcome, FACE_LABELS};
use reveal::{RevealCoordinator, RevealSink, RevealSnapshot};
use scene::{build_scene, SceneDescription};
use themes::{MaterialKind, MaterialOption, Theme, THEMES};
use view::{Effect, Shape, ViewSettings, ViewState};

use log::{error, info, warn};
use serde_json::json;
use std::sync::{Arc, Mutex, MutexGuard};
use tauri::{command, AppHandle, Emitter, Manager, State};

// ============ App State ============

#[derive(Default)]
pub struct AppState {
    view: Mutex<ViewSettings>,
    error: Mutex<Option<String>>,
}

impl AppState {
    fn view(&self) -> Result<MutexGuard<'_, ViewSettings>, String> {
        self.view
            .lock()
            .map_err(|e| format!("View state unavailable: {}", e))
    }

    fn set_error(&self, message: Option<String>) {
        if let Ok(mut slot) = self.error.lock() {
            *slot = message;
        }
    }

    fn error(&self) -> Option<String> {
        self.error.lock().ok().and_then(|slot| slot.clone())
    }
}

/// Forwards reveal progress to the webview as events
struct EventSink {
    app: AppHandle,
}

impl RevealSink for EventSink {
    fn face_updated(&self, run: u64, face: usize, text: &str) {
        let _ = self.app.emit(
            "face-update",
            json!({
                "run": run,
                "face": face,
                "label": FACE_LABELS[face],
                "text": text
            }),
        );
    }

    fn reveal_finished(&self, run: u64) {
        info!("[reveal] Run {} complete", run);
        let _ = self.app.emit("reveal-complete", json!({ "run": run }));
    }
}

fn completion_config_or_default() -> CompletionConfig {
    load_completion_config().unwrap_or_else(|e| {
        warn!("[config] {}; using defaults", e);
        CompletionConfig::default()
    })
}

// ============ Generation Commands ============

#[command]
async fn start_generation(
    state: State<'_, AppState>,
    reveal: State<'_, RevealCoordinator>,
    prompt: String,
) -> Result<GenerationOutcome, String> {
    if prompt.trim().is_empty() {
        let message = GenerationError::InvalidInput.to_string();
        state.set_error(Some(message.clone()));
        return Err(message);
    }

    state.set_error(None);
    let run = reveal.reset();
    info!("[generate] Run {} started", run);

    // Every failure past prompt validation is answered by the fallback
    let outcome = generate_code_with_config(completion_config_or_default(), &prompt)
        .await
        .map_err(|e| e.to_string())?;

    info!(
        "[generate] Run {} got code from {:?}, streaming",
        run, outcome.source
    );
    reveal.stream(run, &outcome.code);
    Ok(outcome)
}

#[command]
fn cancel_generation(reveal: State<'_, RevealCoordinator>) {
    reveal.cancel();
}

#[command]
fn get_faces(reveal: State<'_, RevealCoordinator>) -> RevealSnapshot {
    reveal.snapshot()
}

// ============ View Commands ============

#[command]
fn get_view_state(
    state: State<'_, AppState>,
    reveal: State<'_, RevealCoordinator>,
) -> Result<ViewState, String> {
    let settings = state.view()?.clone();
    Ok(ViewState {
        theme: settings.theme(),
        settings,
        is_generating: reveal.is_generating(),
        error: state.error(),
    })
}

#[command]
fn get_scene(state: State<'_, AppState>) -> Result<SceneDescription, String> {
    Ok(build_scene(&*state.view()?))
}

#[command]
fn list_themes() -> Vec<Theme> {
    THEMES.to_vec()
}

#[command]
fn list_materials() -> Vec<MaterialOption> {
    MaterialKind::ALL.iter().map(|m| m.option()).collect()
}

#[command]
fn set_theme(state: State<'_, AppState>, index: usize) -> Result<SceneDescription, String> {
    let mut view = state.view()?;
    let theme = view.set_theme(index)?;
    info!("[view] Theme set to {}", theme.name);
    Ok(build_scene(&view))
}

#[command]
fn set_shape(state: State<'_, AppState>, shape: Shape) -> Result<SceneDescription, String> {
    let mut view = state.view()?;
    view.shape = shape;
    Ok(build_scene(&view))
}

#[command]
fn set_material(
    state: State<'_, AppState>,
    material: MaterialKind,
) -> Result<SceneDescription, String> {
    let mut view = state.view()?;
    view.material = material;
    Ok(build_scene(&view))
}

#[command]
fn toggle_effect(state: State<'_, AppState>, effect: Effect) -> Result<SceneDescription, String> {
    let mut view = state.view()?;
    let enabled = view.effects.toggle(effect);
    info!("[view] {:?} -> {}", effect, enabled);
    Ok(build_scene(&view))
}

#[command]
fn set_rotation_speed(state: State<'_, AppState>, speed: f32) -> Result<SceneDescription, String> {
    let mut view = state.view()?;
    view.set_rotation_speed(speed)?;
    Ok(build_scene(&view))
}

#[command]
fn step_rotation_speed(
    state: State<'_, AppState>,
    faster: bool,
) -> Result<SceneDescription, String> {
    let mut view = state.view()?;
    view.step_rotation_speed(faster);
    Ok(build_scene(&view))
}

// ============ Completion Config Commands ============

#[command]
async fn save_api_key(key: String) -> Result<(), String> {
    info!("[save_api_key] Saving completion API key");
    let mut config = load_completion_config()?;
    let key = key.trim().to_string();
    config.api_key = if key.is_empty() { None } else { Some(key) };
    save_completion_config(&config)
}

#[command]
async fn has_api_key() -> Result<bool, String> {
    Ok(load_completion_config()?.resolved_api_key().is_some())
}

#[command]
async fn get_completion_config() -> Result<CompletionConfig, String> {
    Ok(load_completion_config()?.redacted())
}

#[command]
async fn set_completion_model(model: String) -> Result<(), String> {
    let model = model.trim();
    if model.is_empty() {
        return Err("Model name cannot be empty".to_string());
    }
    let mut config = load_completion_config()?;
    config.model = model.to_string();
    save_completion_config(&config)
}

// ============ Frontend Logging ============

#[command]
fn log_from_frontend(level: String, message: String) {
    match level.as_str() {
        "error" => error!("[Frontend] {}", message),
        "warn" => warn!("[Frontend] {}", message),
        _ => info!("[Frontend] {}", message),
    }
}

pub fn run() {
    tauri::Builder::default()
        .manage(AppState::default())
        .register_asynchronous_uri_scheme_protocol(API_SCHEME, |_ctx, request, responder| {
            tauri::async_runtime::spawn(async move {
                let response = api::handle_request(&request, || {
                    OpenRouterClient::new(completion_config_or_default())
                })
                .await;
                responder.respond(response);
            });
        })
        .setup(|app| {
            info!("=== CodeCube Desktop Starting ===");
            if let Ok(path) = paths::get_completion_config_path() {
                info!("[startup] Completion config: {:?} (exists: {})", path, path.exists());
            }

            let sink = EventSink {
                app: app.handle().clone(),
            };
            app.manage(RevealCoordinator::new(Arc::new(sink)));
            Ok(())
        })
        .on_window_event(|window, event| {
            if window.label() == "main" {
                if let tauri::WindowEvent::Destroyed = event {
                    if let Some(reveal) = window.app_handle().try_state::<RevealCoordinator>() {
                        reveal.cancel();
                    }
                }
            }
        })
        .plugin(
            tauri_plugin_log::Builder::new()
                .target(tauri_plugin_log::Target::new(
                    tauri_plugin_log::TargetKind::LogDir {
                        file_name: Some("codecube".into()),
                    },
                ))
                .level(log::LevelFilter::Info)
                .build(),
        )
        .invoke_handler(tauri::generate_handler![
            start_generation,
            cancel_generation,
            get_faces,
            get_view_state,
            get_scene,
            list_themes,
            list_materials,
            set_theme,
            set_shape,
            set_material,
            toggle_effect,
            set_rotation_speed,
            step_rotation_speed,
            save_api_key,
            has_api_key,
            get_completion_config,
            set_completion_model,
            log_from_frontend,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
