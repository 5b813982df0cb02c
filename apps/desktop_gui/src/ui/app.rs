use std::{
    path::PathBuf,
    sync::Arc,
    time::{Duration, Instant},
};

use client_core::{
    dashboard::{EMPTY_HINT, EMPTY_TITLE},
    DashboardView, EnrollmentForm, EnrollmentSummary, Navigator, Notice, NoticeSeverity,
    SubmitOutcome, View,
};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use shared::{catalog::CourseCatalog, domain::Age};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{err_label, UiError, UiErrorContext, UiEvent};
use crate::controller::orchestration::dispatch_backend_command;

const NOTICE_TTL: Duration = Duration::from_secs(4);
const IDLE_REPAINT: Duration = Duration::from_millis(250);

#[derive(Debug, Clone)]
pub struct StartupConfig {
    pub database_url: Option<String>,
    pub data_dir: Option<PathBuf>,
}

impl StartupConfig {
    /// Explicit url first, then a database inside `data_dir`, then the
    /// configured default.
    pub fn resolve_database_url(&self, configured: &str) -> String {
        if let Some(url) = &self.database_url {
            return url.clone();
        }
        if let Some(dir) = &self.data_dir {
            return client_core::config::sqlite_url_from_path(&dir.join("enrollment.sqlite3"));
        }
        configured.to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StatusBannerSeverity {
    Error,
}

#[derive(Debug, Clone)]
struct StatusBanner {
    severity: StatusBannerSeverity,
    message: String,
}

struct ActiveNotice {
    notice: Notice,
    shown_at: Instant,
}

pub struct DesktopGuiApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,

    catalog: Arc<CourseCatalog>,
    form: EnrollmentForm,
    navigator: Navigator,
    /// `None` while a dashboard read is in flight.
    dashboard: Option<DashboardView>,

    backend_ready: bool,
    /// The worker never came up; nothing will answer commands.
    backend_failed: bool,
    submit_in_flight: bool,
    notice: Option<ActiveNotice>,
    status: String,
    status_banner: Option<StatusBanner>,
}

impl DesktopGuiApp {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        catalog: Arc<CourseCatalog>,
    ) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            form: EnrollmentForm::new(Arc::clone(&catalog)),
            catalog,
            navigator: Navigator::new(View::Enrollment),
            dashboard: None,
            backend_ready: false,
            backend_failed: false,
            submit_in_flight: false,
            notice: None,
            status: "Opening enrollment storage".to_string(),
            status_banner: None,
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::BackendReady => {
                    self.backend_ready = true;
                    self.status = "Ready".to_string();
                    if self.navigator.current() == View::Dashboard {
                        self.request_dashboard();
                    }
                }
                UiEvent::Submitted(outcome) => {
                    self.submit_in_flight = false;
                    self.apply_submit_outcome(outcome);
                }
                UiEvent::DashboardLoaded(view) => {
                    if self.navigator.current() == View::Dashboard {
                        self.dashboard = Some(view);
                    }
                }
                UiEvent::Error(err) => self.apply_error(err),
            }
        }
    }

    fn apply_submit_outcome(&mut self, outcome: SubmitOutcome) {
        if let Some(redirect) = outcome.redirect() {
            // The record is already written; the dashboard read that follows
            // the redirect is queued behind it.
            if self.navigator.current() == View::Enrollment {
                self.navigator.schedule(redirect, Instant::now());
            }
        }
        self.status = outcome.notice().to_string();
        self.show_notice(outcome.notice().clone());
    }

    fn apply_error(&mut self, err: UiError) {
        tracing::warn!(context = ?err.context(), "{}", err.message());
        self.status = format!("{} error: {}", err_label(err.category()), err.message());
        if err.is_fatal() {
            self.backend_ready = false;
            self.backend_failed = true;
            self.submit_in_flight = false;
        }
        // A dashboard that cannot be read shows the empty state.
        if self.navigator.current() == View::Dashboard {
            self.dashboard = Some(DashboardView::Empty);
        }
        self.status_banner = Some(StatusBanner {
            severity: StatusBannerSeverity::Error,
            message: self.status.clone(),
        });
    }

    fn show_notice(&mut self, notice: Notice) {
        self.notice = Some(ActiveNotice {
            notice,
            shown_at: Instant::now(),
        });
    }

    fn navigate(&mut self, to: View) {
        if !self.navigator.navigate(to) {
            return;
        }
        self.enter_view(to);
    }

    fn enter_view(&mut self, view: View) {
        tracing::debug!(path = view.path(), "entered view");
        match view {
            View::Enrollment => {
                self.form.reset();
                self.dashboard = None;
            }
            View::Dashboard => self.request_dashboard(),
        }
    }

    fn request_dashboard(&mut self) {
        if self.backend_failed {
            self.dashboard = Some(DashboardView::Empty);
            return;
        }
        self.dashboard = None;
        if !self.backend_ready {
            return;
        }
        if !dispatch_backend_command(&self.cmd_tx, BackendCommand::LoadDashboard, &mut self.status)
        {
            let message = self.status.clone();
            self.apply_error(UiError::from_message(UiErrorContext::Dashboard, message));
            self.dashboard = Some(DashboardView::Empty);
        }
    }

    fn submit(&mut self) {
        if self.submit_in_flight {
            return;
        }
        // Rejections never touch storage, so they are reported right away.
        if self.form.prepare_submission().is_err() {
            self.status = "Missing information".to_string();
            self.show_notice(Notice::missing_information());
            return;
        }
        if !self.backend_ready {
            self.show_notice(Notice::save_failed("storage is not available"));
            return;
        }

        let cmd = BackendCommand::SubmitEnrollment {
            draft: self.form.draft().clone(),
        };
        if dispatch_backend_command(&self.cmd_tx, cmd, &mut self.status) {
            self.submit_in_flight = true;
            self.status = "Saving enrollment".to_string();
        } else {
            let message = self.status.clone();
            self.show_notice(Notice::save_failed(&message));
            self.apply_error(UiError::from_message(UiErrorContext::Submit, message));
        }
    }

    fn show_status_banner(&self, ui: &mut egui::Ui) {
        let Some(banner) = &self.status_banner else {
            return;
        };
        let color = match banner.severity {
            StatusBannerSeverity::Error => ui.visuals().error_fg_color,
        };
        egui::Frame::NONE
            .stroke(egui::Stroke::new(1.0, color))
            .corner_radius(8.0)
            .inner_margin(egui::Margin::symmetric(12, 8))
            .show(ui, |ui| {
                ui.colored_label(color, &banner.message);
            });
        ui.add_space(8.0);
    }

    fn show_enrollment_view(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    ui.set_max_width(640.0);
                    ui.add_space(24.0);
                    ui.heading("📖 Course Enrollment");
                    ui.weak("Join our exciting courses and start your learning journey!");
                    ui.add_space(12.0);
                    self.show_status_banner(ui);
                });

                ui.horizontal(|ui| {
                    ui.label("Student Name");
                    let mut name_buf = self.form.draft().name.clone();
                    let response = ui.add(
                        egui::TextEdit::singleline(&mut name_buf).hint_text("Enter your name"),
                    );
                    if response.changed() {
                        self.form.set_name(name_buf);
                    }
                });

                ui.horizontal(|ui| {
                    ui.label("Age");
                    let mut age = self.form.draft().age;
                    let selected_text = age
                        .map(|age| format!("{age} years old"))
                        .unwrap_or_else(|| "Select age".to_string());
                    egui::ComboBox::from_id_salt("enrollment_age")
                        .selected_text(selected_text)
                        .show_ui(ui, |ui| {
                            for option in Age::options() {
                                ui.selectable_value(
                                    &mut age,
                                    Some(option),
                                    format!("{option} years old"),
                                );
                            }
                        });
                    if let Some(age) = age {
                        if self.form.draft().age != Some(age) {
                            self.form.set_age(age);
                        }
                    }
                });

                ui.add_space(12.0);
                ui.label(egui::RichText::new("Choose Your Courses").strong().size(18.0));
                ui.add_space(6.0);

                let catalog = Arc::clone(&self.catalog);
                for course in catalog.list_courses() {
                    egui::Frame::group(ui.style()).show(ui, |ui| {
                        ui.set_width(ui.available_width());
                        ui.horizontal(|ui| {
                            let mut checked = self.form.is_selected(&course.id);
                            if ui
                                .checkbox(&mut checked, egui::RichText::new(&course.name).strong())
                                .changed()
                            {
                                if let Err(err) = self.form.toggle_course(&course.id) {
                                    tracing::warn!("course toggle refused: {err}");
                                }
                            }
                            ui.with_layout(
                                egui::Layout::right_to_left(egui::Align::Center),
                                |ui| {
                                    ui.small(&course.level);
                                },
                            );
                        });
                        ui.weak(&course.description);
                        ui.small(format!(
                            "🕒 {}   📅 {}   👤 {}",
                            course.time, course.day, course.instructor
                        ));
                    });
                }

                ui.add_space(12.0);
                ui.vertical_centered_justified(|ui| {
                    let label = if self.submit_in_flight {
                        "Saving..."
                    } else {
                        "Enroll Now! 🚀"
                    };
                    if ui
                        .add_enabled(!self.submit_in_flight, egui::Button::new(label))
                        .clicked()
                    {
                        self.submit();
                    }
                    if self.navigator.has_pending() {
                        ui.weak("Opening your dashboard...");
                    }
                    if ui.link("View dashboard").clicked() {
                        self.navigate(View::Dashboard);
                    }
                });
            });
        });
    }

    fn show_dashboard_view(&mut self, ctx: &egui::Context) {
        let mut back_requested = false;
        egui::CentralPanel::default().show(ctx, |ui| {
            self.show_status_banner(ui);
            match &self.dashboard {
                None => {
                    ui.vertical_centered(|ui| {
                        ui.add_space(48.0);
                        ui.spinner();
                    });
                }
                Some(DashboardView::Empty) => {
                    ui.vertical_centered(|ui| {
                        ui.add_space(48.0);
                        ui.heading(EMPTY_TITLE);
                        ui.weak(EMPTY_HINT);
                        ui.add_space(12.0);
                        if ui.button("Go Back to Enrollment").clicked() {
                            back_requested = true;
                        }
                    });
                }
                Some(DashboardView::Enrolled(summary)) => {
                    if show_enrollment_summary(ui, summary) {
                        back_requested = true;
                    }
                }
            }
        });
        if back_requested {
            self.navigate(View::Enrollment);
        }
    }

    fn show_notice_toast(&mut self, ctx: &egui::Context) {
        let expired = self
            .notice
            .as_ref()
            .is_some_and(|active| active.shown_at.elapsed() >= NOTICE_TTL);
        if expired {
            self.notice = None;
        }
        let Some(active) = &self.notice else {
            return;
        };

        egui::Area::new(egui::Id::new("enrollment_notice"))
            .anchor(egui::Align2::RIGHT_BOTTOM, [-16.0, -16.0])
            .show(ctx, |ui| {
                let accent = match active.notice.severity {
                    NoticeSeverity::Success => egui::Color32::from_rgb(34, 160, 90),
                    NoticeSeverity::Destructive => ui.visuals().error_fg_color,
                };
                egui::Frame::popup(ui.style())
                    .stroke(egui::Stroke::new(1.0, accent))
                    .show(ui, |ui| {
                        ui.set_max_width(320.0);
                        ui.colored_label(accent, egui::RichText::new(&active.notice.title).strong());
                        ui.label(&active.notice.description);
                    });
            });
    }
}

/// Renders the enrolled state. Returns true when "Back" was clicked.
fn show_enrollment_summary(ui: &mut egui::Ui, summary: &EnrollmentSummary) -> bool {
    let mut back = false;
    ui.horizontal(|ui| {
        if ui.button("⬅ Back").clicked() {
            back = true;
        }
        ui.vertical(|ui| {
            ui.heading(summary.greeting());
            ui.weak("Your Learning Dashboard");
        });
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.label(summary.age_label());
        });
    });
    ui.separator();

    ui.columns(3, |columns| {
        stat_card(&mut columns[0], &summary.course_count().to_string(), "Enrolled Courses");
        stat_card(&mut columns[1], &summary.weekly_hours_label(), "Weekly Hours");
        stat_card(&mut columns[2], summary.status_label(), "Student Status");
    });

    ui.add_space(12.0);
    ui.label(egui::RichText::new("My Class Schedule").strong().size(18.0));
    for course in summary.courses() {
        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new(&course.name).strong().size(16.0));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.small(&course.level);
                });
            });
            ui.horizontal(|ui| {
                ui.weak("Time:");
                ui.label(&course.time);
                ui.weak("Day:");
                ui.label(&course.day);
                ui.weak("Instructor:");
                ui.label(&course.instructor);
            });
        });
    }
    back
}

fn stat_card(ui: &mut egui::Ui, value: &str, caption: &str) {
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.label(egui::RichText::new(value).strong().size(24.0));
        ui.weak(caption);
    });
}

impl eframe::App for DesktopGuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        if let Some(view) = self.navigator.poll(Instant::now()) {
            self.enter_view(view);
        }

        match self.navigator.current() {
            View::Enrollment => self.show_enrollment_view(ctx),
            View::Dashboard => self.show_dashboard_view(ctx),
        }
        self.show_notice_toast(ctx);

        let repaint_after = self
            .navigator
            .time_until_redirect(Instant::now())
            .map_or(IDLE_REPAINT, |remaining| remaining.min(IDLE_REPAINT));
        ctx.request_repaint_after(repaint_after);
    }
}
