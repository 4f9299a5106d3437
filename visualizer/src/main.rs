use iced::{
    mouse, time,
    widget::{
        button,
        canvas::{self, Canvas, Frame, Geometry, LineDash, Path, Stroke},
        column, row, scrollable, space, text, Column, Container,
    },
    Alignment, Color, Element, Length, Point, Rectangle, Renderer, Subscription, Task, Theme,
};
use powercore::figure::FigureModel;
use powercore::prelude::ControlSpec;
use serde::{Deserialize, Serialize};
use std::time::Duration;

fn main() -> iced::Result {
    iced::application(Visualizer::boot, Visualizer::update, Visualizer::view)
        .title(application_title)
        .subscription(application_subscription)
        .theme(application_theme)
        .run()
}

fn application_title(_: &Visualizer) -> String {
    "AC Power Explorer".into()
}

fn application_subscription(_: &Visualizer) -> Subscription<Message> {
    time::every(Duration::from_secs(1)).map(|_| Message::Tick)
}

fn application_theme(_: &Visualizer) -> Theme {
    Theme::Dark
}

const BRIDGE_URL: &str = "http://127.0.0.1:9000";
const PRESET_NAMES: [&str; 4] = ["unity", "generating", "quadrature", "lagging"];

const DASH_SEGMENTS: [f32; 2] = [10.0, 6.0];
const DASH_DOT_SEGMENTS: [f32; 4] = [10.0, 5.0, 2.0, 5.0];

#[derive(Debug)]
struct Visualizer {
    control_spec: ControlSpec,
    controls: ControlsForm,
    figure: Option<FigureModel>,
    host_activity: Vec<String>,
    status: String,
    history: Vec<String>,
    sync_controls: bool,
}

#[derive(Debug, Clone)]
enum Message {
    Tick,
    FigureFetched(Result<ViewPayload, String>),
    FrequencyChanged(f64),
    VoltagePhaseChanged(f64),
    CurrentPhaseChanged(f64),
    PresetPressed(&'static str),
    ControlsPosted(Result<String, String>),
}

impl Visualizer {
    fn boot() -> (Self, Task<Message>) {
        (
            Visualizer {
                control_spec: ControlSpec::default(),
                controls: ControlsForm::default(),
                figure: None,
                host_activity: Vec::new(),
                status: "Waiting for figure...".into(),
                history: Vec::new(),
                sync_controls: true,
            },
            Task::perform(fetch_figure(), Message::FigureFetched),
        )
    }

    fn update(state: &mut Self, message: Message) -> Task<Message> {
        match message {
            Message::Tick => Task::perform(fetch_figure(), Message::FigureFetched),
            Message::FigureFetched(Ok(payload)) => {
                if state.sync_controls {
                    if let Some(settings) = &payload.settings {
                        state.controls.adopt(settings);
                    }
                    state.sync_controls = false;
                }
                state.host_activity = payload.activity.clone();
                if let Some(figure) = payload.figure {
                    state.status = format!(
                        "Figure received: {} traces / {} samples",
                        figure.traces.len(),
                        figure.time.len()
                    );
                    state.push_history(format!(
                        "Figure: {} traces / {} annotations",
                        figure.traces.len(),
                        figure.annotations.len()
                    ));
                    state.figure = Some(figure);
                } else {
                    state.status = "Bridge is up, no figure published yet.".into();
                }
                Task::none()
            }
            Message::FigureFetched(Err(err)) => {
                state.status = format!("Figure error: {err}");
                Task::none()
            }
            Message::FrequencyChanged(value) => {
                state.controls.frequency_hz = value;
                Task::perform(post_controls(state.controls.to_body()), Message::ControlsPosted)
            }
            Message::VoltagePhaseChanged(value) => {
                state.controls.voltage_phase_deg = value;
                Task::perform(post_controls(state.controls.to_body()), Message::ControlsPosted)
            }
            Message::CurrentPhaseChanged(value) => {
                state.controls.current_phase_deg = value;
                Task::perform(post_controls(state.controls.to_body()), Message::ControlsPosted)
            }
            Message::PresetPressed(name) => {
                state.sync_controls = true;
                state.push_history(format!("Preset {name} requested"));
                Task::perform(post_preset(name.to_string()), Message::ControlsPosted)
            }
            Message::ControlsPosted(Ok(message)) => {
                state.status = message;
                Task::perform(fetch_figure(), Message::FigureFetched)
            }
            Message::ControlsPosted(Err(err)) => {
                state.status = format!("Controls error: {err}");
                Task::none()
            }
        }
    }

    fn view(state: &Self) -> Element<'_, Message> {
        let spec = &state.control_spec;

        let preset_buttons = PRESET_NAMES.iter().fold(
            iced::widget::Row::new().spacing(6),
            |buttons, name| {
                buttons.push(
                    button(text(*name).size(12))
                        .on_press(Message::PresetPressed(*name))
                        .padding(6),
                )
            },
        );

        let controls_column = column![
            text("Controls").size(26),
            text(format!("Frequency (Hertz): {:.1}", state.controls.frequency_hz)).size(14),
            iced::widget::slider(
                spec.frequency_hz.min..=spec.frequency_hz.max,
                state.controls.frequency_hz,
                Message::FrequencyChanged,
            )
            .step(spec.frequency_hz.step),
            text(format!("Voltage Phase (Degs): {:.0}", state.controls.voltage_phase_deg)).size(14),
            iced::widget::slider(
                spec.voltage_phase_deg.min..=spec.voltage_phase_deg.max,
                state.controls.voltage_phase_deg,
                Message::VoltagePhaseChanged,
            )
            .step(spec.voltage_phase_deg.step),
            text(format!("Current Phase (Degs): {:.0}", state.controls.current_phase_deg)).size(14),
            iced::widget::slider(
                spec.current_phase_deg.min..=spec.current_phase_deg.max,
                state.controls.current_phase_deg,
                Message::CurrentPhaseChanged,
            )
            .step(spec.current_phase_deg.step),
            text("Presets").size(16),
            preset_buttons,
            text(&state.status).size(14),
            column![
                text("Parameter definitions").size(16),
                text("Frequency: signal frequency in hertz; the instantaneous power oscillates at twice this rate.")
                    .size(12),
                text("Voltage phase: phase angle of the voltage sinusoid, degrees.").size(12),
                text("Current phase: phase angle of the current sinusoid, degrees.").size(12),
                text("Active power P: net transferred power, constant over time.").size(12),
                text("Reactive power Q: power oscillating without net transfer.").size(12),
                text("Power factor: P over apparent power S; 1 when the phases align.").size(12),
            ]
            .spacing(4)
            .padding(6),
        ]
        .spacing(10)
        .padding(16)
        .width(Length::Fixed(360.0));

        let figure_info = if let Some(figure) = &state.figure {
            text(format!(
                "Traces: {} / {} samples",
                figure.traces.len(),
                figure.time.len()
            ))
            .size(18)
        } else {
            text("Traces: n/a").size(18)
        };

        let legend_row = state
            .figure
            .as_ref()
            .map(|figure| {
                figure.traces.iter().fold(
                    iced::widget::Row::new().push(space::horizontal()).spacing(12),
                    |legend, trace| {
                        let color = trace_color(trace.color);
                        legend.push(
                            text(trace.name.clone())
                                .size(13)
                                .style(move |_: &Theme| text::Style { color: Some(color) }),
                        )
                    },
                )
            })
            .unwrap_or_else(|| iced::widget::Row::new().push(space::horizontal()));

        let chart: Element<'_, Message> = if let Some(figure) = &state.figure {
            Canvas::new(PowerChart {
                figure: figure.clone(),
            })
            .width(Length::Fill)
            .height(Length::Fixed(320.0))
            .into()
        } else {
            text("No figure yet").size(14).into()
        };

        let annotation_entries = if let Some(figure) = &state.figure {
            figure
                .annotations
                .iter()
                .fold(Column::new().spacing(4), |entries, annotation| {
                    let entry = if annotation.highlighted {
                        text(annotation.text.clone())
                            .size(13)
                            .style(|_: &Theme| text::Style {
                                color: Some(Color::from_rgb(0.95, 0.55, 0.2)),
                            })
                    } else {
                        text(annotation.text.clone()).size(12)
                    };
                    entries.push(entry)
                })
        } else {
            Column::new().push(text("No annotations to list").size(12))
        };

        let host_activity_list = if state.host_activity.is_empty() {
            Column::new().push(text("No host activity yet").size(14))
        } else {
            state
                .host_activity
                .iter()
                .rev()
                .fold(Column::new().spacing(4), |entries, line| {
                    entries.push(text(line.clone()).size(14))
                })
        };

        let history_list = if state.history.is_empty() {
            Column::new().push(text("No activity yet").size(12))
        } else {
            state
                .history
                .iter()
                .rev()
                .fold(Column::new().spacing(4), |entries, entry| {
                    entries.push(text(entry.clone()).size(12))
                })
        };

        let axis_caption = if let Some(figure) = &state.figure {
            text(format!(
                "x: {} | y: {} (drawing clipped to the fixed range)",
                figure.time_axis.title, figure.power_axis.title
            ))
            .size(12)
        } else {
            text("").size(12)
        };

        let figure_column = column![
            text("Power Figure").size(26),
            figure_info,
            legend_row,
            chart,
            axis_caption,
            text("Annotations").size(16),
            Container::new(annotation_entries).padding(6),
            text("Host activity").size(16),
            Container::new(scrollable(host_activity_list).height(Length::Fixed(120.0))).padding(6),
            text("Activity log").size(16),
            Container::new(scrollable(history_list).height(Length::Fixed(90.0))).padding(6),
        ]
        .spacing(10)
        .padding(16)
        .width(Length::Fill);

        let layout = row![controls_column, figure_column]
            .spacing(20)
            .align_y(Alignment::Start)
            .padding(20);

        Container::new(layout)
            .width(Length::Fill)
            .height(Length::Fill)
            .center_y(Length::Fill)
            .into()
    }

    fn push_history(&mut self, entry: String) {
        self.history.push(entry);
        if self.history.len() > 20 {
            self.history.remove(0);
        }
    }
}

async fn fetch_figure() -> Result<ViewPayload, String> {
    let response = reqwest::get(format!("{BRIDGE_URL}/figure"))
        .await
        .map_err(|e| e.to_string())?;
    response
        .json::<ViewPayload>()
        .await
        .map_err(|e| e.to_string())
}

async fn post_controls(body: ControlsBody) -> Result<String, String> {
    let client = reqwest::Client::new();
    let response = client
        .post(format!("{BRIDGE_URL}/controls"))
        .json(&body)
        .send()
        .await
        .map_err(|e| e.to_string())?;
    if response.status().is_success() {
        Ok("Controls applied".into())
    } else {
        let status = response.status();
        let text = response.text().await.unwrap_or_else(|_| "".into());
        Err(format!("{}: {}", status, text))
    }
}

async fn post_preset(name: String) -> Result<String, String> {
    let client = reqwest::Client::new();
    let response = client
        .post(format!("{BRIDGE_URL}/preset"))
        .json(&PresetBody { name })
        .send()
        .await
        .map_err(|e| e.to_string())?;
    if response.status().is_success() {
        Ok("Preset applied".into())
    } else {
        let status = response.status();
        let text = response.text().await.unwrap_or_else(|_| "".into());
        Err(format!("{}: {}", status, text))
    }
}

#[derive(Debug, Clone)]
struct ControlsForm {
    frequency_hz: f64,
    voltage_phase_deg: f64,
    current_phase_deg: f64,
}

impl Default for ControlsForm {
    fn default() -> Self {
        let spec = ControlSpec::default();
        Self {
            frequency_hz: spec.frequency_hz.default,
            voltage_phase_deg: spec.voltage_phase_deg.default,
            current_phase_deg: spec.current_phase_deg.default,
        }
    }
}

impl ControlsForm {
    fn adopt(&mut self, settings: &ControlsBody) {
        self.frequency_hz = settings.frequency_hz;
        self.voltage_phase_deg = settings.voltage_phase_deg;
        self.current_phase_deg = settings.current_phase_deg;
    }

    fn to_body(&self) -> ControlsBody {
        ControlsBody {
            frequency_hz: self.frequency_hz,
            voltage_phase_deg: self.voltage_phase_deg,
            current_phase_deg: self.current_phase_deg,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ControlsBody {
    frequency_hz: f64,
    voltage_phase_deg: f64,
    current_phase_deg: f64,
}

#[derive(Debug, Serialize)]
struct PresetBody {
    name: String,
}

#[derive(Debug, Clone, Deserialize)]
struct ViewPayload {
    #[serde(default)]
    figure: Option<FigureModel>,
    #[serde(default)]
    settings: Option<ControlsBody>,
    #[serde(default)]
    activity: Vec<String>,
}

fn trace_color(rgb: [f32; 3]) -> Color {
    Color::from_rgb(rgb[0], rgb[1], rgb[2])
}

#[derive(Clone)]
struct PowerChart {
    figure: FigureModel,
}

impl canvas::Program<Message> for PowerChart {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        frame.fill_rectangle(
            Point::ORIGIN,
            bounds.size(),
            Color::from_rgb(0.05, 0.05, 0.05),
        );

        let margin = 16.0_f32;
        let plot_width = (bounds.width - 2.0 * margin).max(1.0);
        let plot_height = (bounds.height - 2.0 * margin).max(1.0);

        let (t_min, t_max) = match (self.figure.time.first(), self.figure.time.last()) {
            (Some(&first), Some(&last)) if last > first => (first, last),
            _ => (0.0, 1.0),
        };
        let [p_min, p_max] = self.figure.power_axis.range.unwrap_or([-5.0, 5.0]);

        let map_x = |t: f64| margin + ((t - t_min) / (t_max - t_min)) as f32 * plot_width;
        let map_y = |p: f64| {
            let clipped = p.clamp(p_min, p_max);
            bounds.height - margin - ((clipped - p_min) / (p_max - p_min)) as f32 * plot_height
        };

        let grid_color = Color::from_rgb(0.18, 0.18, 0.22);
        let mut level = p_min.ceil();
        while level <= p_max {
            let gridline = Path::new(|builder| {
                builder.move_to(Point::new(map_x(t_min), map_y(level)));
                builder.line_to(Point::new(map_x(t_max), map_y(level)));
            });
            let color = if level == 0.0 {
                Color::from_rgb(0.45, 0.45, 0.55)
            } else {
                grid_color
            };
            frame.stroke(&gridline, Stroke::default().with_color(color));
            level += 1.0;
        }
        for step in 0..=4 {
            let t = t_min + (t_max - t_min) * f64::from(step) / 4.0;
            let gridline = Path::new(|builder| {
                builder.move_to(Point::new(map_x(t), map_y(p_min)));
                builder.line_to(Point::new(map_x(t), map_y(p_max)));
            });
            frame.stroke(&gridline, Stroke::default().with_color(grid_color));
        }

        for trace in &self.figure.traces {
            if trace.values.len() < 2 || self.figure.time.len() != trace.values.len() {
                continue;
            }
            let path = Path::new(|builder| {
                for (i, (&t, &value)) in
                    self.figure.time.iter().zip(trace.values.iter()).enumerate()
                {
                    let point = Point::new(map_x(t), map_y(value));
                    if i == 0 {
                        builder.move_to(point);
                    } else {
                        builder.line_to(point);
                    }
                }
            });

            let base = Stroke::default()
                .with_width(trace.width)
                .with_color(trace_color(trace.color));
            let stroke = match trace.style {
                powercore::figure::LineStyle::Solid => base,
                powercore::figure::LineStyle::Dash => Stroke {
                    line_dash: LineDash {
                        segments: &DASH_SEGMENTS,
                        offset: 0,
                    },
                    ..base
                },
                powercore::figure::LineStyle::DashDot => Stroke {
                    line_dash: LineDash {
                        segments: &DASH_DOT_SEGMENTS,
                        offset: 0,
                    },
                    ..base
                },
            };
            frame.stroke(&path, stroke);
        }

        for annotation in self.figure.annotations.iter().filter(|a| a.highlighted) {
            let anchor = Point::new(map_x(annotation.position.0), map_y(annotation.position.1));
            let marker = Path::new(|builder| builder.circle(anchor, 5.0));
            frame.fill(&marker, Color::from_rgb(0.95, 0.55, 0.2));
            let stem = Path::new(|builder| {
                builder.move_to(Point::new(anchor.x, anchor.y - 18.0));
                builder.line_to(Point::new(anchor.x, anchor.y - 6.0));
            });
            frame.stroke(
                &stem,
                Stroke::default()
                    .with_width(2.0)
                    .with_color(Color::from_rgb(0.95, 0.55, 0.2)),
            );
        }

        vec![frame.into_geometry()]
    }
}
