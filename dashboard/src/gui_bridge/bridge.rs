use crate::gui_bridge::model::ViewState;
use crate::scenario::presets;
use crate::workflow::config::ControlSettings;
use crate::workflow::runner::Runner;
use anyhow::Result;
use serde::Deserialize;
use serde_json::json;
use std::{
    net::SocketAddr,
    sync::{Arc, RwLock},
    thread,
};
use tokio::runtime::Builder;
use warp::{http::StatusCode, Filter};

fn gui_bind_address() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 9000))
}

#[derive(Debug)]
struct WarpError;

impl warp::reject::Reject for WarpError {}

#[derive(Debug, Deserialize)]
struct PresetRequest {
    name: String,
}

/// Bridge that hosts the figure HTTP endpoint and processes incoming
/// control changes.
pub struct GuiBridge {
    state: Arc<RwLock<ViewState>>,
}

impl GuiBridge {
    pub fn new(runner: Arc<Runner>) -> Self {
        let state = Arc::new(RwLock::new(ViewState::default()));
        let state_for_filter = state.clone();
        let state_filter = warp::any().map(move || state_for_filter.clone());
        let runner_filter = warp::any().map(move || runner.clone());

        let figure_route = warp::path("figure")
            .and(warp::get())
            .and(state_filter.clone())
            .map(|state: Arc<RwLock<ViewState>>| warp::reply::json(&*state.read().unwrap()));

        let controls_route = warp::path("controls")
            .and(warp::post())
            .and(warp::body::json())
            .and(state_filter.clone())
            .and(runner_filter.clone())
            .and_then(
                |settings: ControlSettings,
                 state: Arc<RwLock<ViewState>>,
                 runner: Arc<Runner>| async move {
                    match runner.execute(&settings) {
                        Ok(outcome) => {
                            let mut guard = state.write().unwrap();
                            *guard = ViewState {
                                figure: Some(outcome.figure.clone()),
                                settings: Some(settings),
                                activity: runner.activity(),
                            };
                            Ok::<_, warp::Rejection>(warp::reply::with_status(
                                warp::reply::json(&json!({
                                    "status": "ok",
                                    "power_factor": outcome.power_factor,
                                    "phase_difference_deg": outcome.phase_difference_deg,
                                })),
                                StatusCode::OK,
                            ))
                        }
                        Err(err) => {
                            eprintln!("controls error: {}", err);
                            Err(warp::reject::custom(WarpError))
                        }
                    }
                },
            );

        let preset_route = warp::path("preset")
            .and(warp::post())
            .and(warp::body::json())
            .and(state_filter.clone())
            .and(runner_filter.clone())
            .and_then(
                |request: PresetRequest,
                 state: Arc<RwLock<ViewState>>,
                 runner: Arc<Runner>| async move {
                    let Some(preset) = presets::find(&request.name) else {
                        eprintln!("preset error: unknown preset {}", request.name);
                        return Err(warp::reject::custom(WarpError));
                    };
                    match runner.execute(&preset.settings) {
                        Ok(outcome) => {
                            let mut guard = state.write().unwrap();
                            *guard = ViewState {
                                figure: Some(outcome.figure.clone()),
                                settings: Some(preset.settings.clone()),
                                activity: runner.activity(),
                            };
                            println!(
                                "[GUI] Preset {} -> power factor {:.2}",
                                preset.name, outcome.power_factor
                            );
                            Ok::<_, warp::Rejection>(warp::reply::with_status(
                                warp::reply::json(&json!({
                                    "status": "ok",
                                    "power_factor": outcome.power_factor,
                                    "summary": preset.summary,
                                })),
                                StatusCode::OK,
                            ))
                        }
                        Err(err) => {
                            eprintln!("preset error: {}", err);
                            Err(warp::reject::custom(WarpError))
                        }
                    }
                },
            );

        let metrics_route = warp::path("metrics")
            .and(warp::get())
            .and(runner_filter)
            .map(|runner: Arc<Runner>| warp::reply::json(&runner.metrics_snapshot()));

        thread::spawn(move || {
            let routes = figure_route
                .or(controls_route)
                .or(preset_route)
                .or(metrics_route);
            let runtime = Builder::new_current_thread()
                .enable_all()
                .build()
                .expect("failed to build runtime");
            runtime.block_on(async move {
                warp::serve(routes).run(gui_bind_address()).await;
            });
        });

        Self { state }
    }

    pub fn publish(&self, model: &ViewState) -> Result<()> {
        let mut guard = self.state.write().unwrap();
        *guard = model.clone();
        println!(
            "[GUI] figure traces: {}, annotations: {}",
            guard.figure.as_ref().map(|f| f.traces.len()).unwrap_or(0),
            guard
                .figure
                .as_ref()
                .map(|f| f.annotations.len())
                .unwrap_or(0)
        );
        Ok(())
    }

    pub fn publish_status(&self, message: &str) {
        println!("[GUI] {}", message);
    }

    #[cfg(test)]
    pub fn snapshot(&self) -> ViewState {
        self.state.read().unwrap().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflow::config::ControlSettings;
    use crate::workflow::runner::Runner;
    use std::sync::Arc;

    #[test]
    fn gui_bridge_updates_state() {
        let runner = Arc::new(Runner::new());
        let gui = GuiBridge::new(runner.clone());
        let settings = ControlSettings::from_args(5.0, 90.0, 0.0);
        let outcome = runner.execute(&settings).unwrap();
        let model = ViewState {
            figure: Some(outcome.figure.clone()),
            settings: Some(settings),
            activity: runner.activity(),
        };
        gui.publish(&model).unwrap();
        let snapshot = gui.snapshot();
        assert_eq!(snapshot.figure.unwrap().traces.len(), 3);
        assert_eq!(snapshot.activity.len(), 1);
    }
}
