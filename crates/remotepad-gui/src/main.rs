#![forbid(unsafe_code)]
#![cfg_attr(
    all(not(debug_assertions), target_os = "windows"),
    windows_subsystem = "windows"
)]

use std::{
    ffi::OsString,
    sync::mpsc::{self, Receiver, Sender},
};

use eframe::egui;
use remotepad_core::{
    remote::{self, FileId},
    session::Session,
    surface::TextSurface,
};

mod net;

use net::NetEvent;

#[derive(Clone, Debug, PartialEq, Eq)]
struct LaunchOptions {
    page_url: OsString,
}

fn parse_launch_options<I, S>(args: I) -> Option<LaunchOptions>
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
{
    let mut page_url = None;

    for arg in args {
        let arg = arg.into();
        if page_url.is_none() {
            page_url = Some(arg);
        }
    }

    page_url.map(|page_url| LaunchOptions { page_url })
}

/// Whether a close request must be intercepted and turned into the
/// unsaved-changes prompt: unsaved edits exist and the user has not
/// already decided to leave.
fn should_guard_close(close_requested: bool, allow_close: bool, dirty: bool) -> bool {
    close_requested && !allow_close && dirty
}

fn main() -> eframe::Result {
    let parsed = parse_launch_options(std::env::args_os().skip(1))
        .as_ref()
        .and_then(|options| options.page_url.to_str())
        .and_then(remote::split_page_url);
    let Some((origin, file_id)) = parsed else {
        eprintln!("usage: remotepad <file-page-url>");
        eprintln!("       the address must end in the file identifier, e.g. http://host/files/Kx3");
        std::process::exit(2);
    };

    let mut app = RemotepadApp::new(origin, file_id);

    // Viewport sizes are in points, so they scale with the OS DPI factor.
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 640.0])
            .with_min_inner_size([480.0, 320.0]),
        ..Default::default()
    };
    eframe::run_native(
        "remotepad",
        options,
        Box::new(move |cc| {
            app.start_load(&cc.egui_ctx);
            Ok(Box::new(app))
        }),
    )
}

struct RemotepadApp {
    session: Session,
    surface: TextSurface,
    origin: String,
    error: Option<String>,
    events: Receiver<NetEvent>,
    event_tx: Sender<NetEvent>,
    save_in_flight: bool,
    load_generation: u64,
    confirm_close: bool,
    close_after_save: bool,
    allow_close: bool,
}

impl eframe::App for RemotepadApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_events(ctx);

        let dialog_open = self.confirm_close;
        let save = ctx.input(|i| i.modifiers.command && i.key_pressed(egui::Key::S));
        if save && !dialog_open {
            self.request_save(ctx);
        }

        let close_requested = ctx.input(|i| i.viewport().close_requested());
        if should_guard_close(close_requested, self.allow_close, self.session.is_dirty()) {
            ctx.send_viewport_cmd(egui::ViewportCommand::CancelClose);
            self.confirm_close = true;
        }

        self.show_status_bar(ctx);

        let load_failure = self.session.load_error().map(ToString::to_string);
        egui::CentralPanel::default().show(ctx, |ui| {
            if self.session.is_loaded() {
                self.show_editor(ui);
            } else if let Some(message) = &load_failure {
                ui.centered_and_justified(|ui| {
                    ui.colored_label(
                        ui.visuals().error_fg_color,
                        format!("Could not load this file.\n{message}"),
                    );
                });
            } else {
                ui.centered_and_justified(|ui| {
                    ui.spinner();
                });
            }
        });

        self.show_close_dialog(ctx);
        self.update_viewport_title(ctx);
    }
}

impl RemotepadApp {
    fn new(origin: String, file_id: FileId) -> Self {
        let (event_tx, events) = mpsc::channel();
        Self {
            session: Session::new(file_id),
            surface: TextSurface::new(),
            origin,
            error: None,
            events,
            event_tx,
            save_in_flight: false,
            load_generation: 0,
            confirm_close: false,
            close_after_save: false,
            allow_close: false,
        }
    }

    fn content_url(&self) -> String {
        remote::content_url(&self.origin, self.session.file_id())
    }

    /// Issue the initial read. Runs once on startup, never retried.
    fn start_load(&mut self, ctx: &egui::Context) {
        self.load_generation += 1;
        net::fetch_content(ctx, &self.event_tx, &self.content_url(), self.load_generation);
    }

    fn drain_events(&mut self, ctx: &egui::Context) {
        while let Ok(event) = self.events.try_recv() {
            match event {
                NetEvent::LoadFinished { generation, result } => {
                    if generation != self.load_generation {
                        // Response for a torn-down load; drop it.
                        continue;
                    }
                    match result {
                        Ok(text) => self.session.apply_load(&mut self.surface, &text),
                        Err(err) => {
                            self.error = Some(err.to_string());
                            self.session.fail_load(err);
                        }
                    }
                }
                NetEvent::SaveFinished(result) => {
                    self.save_in_flight = false;
                    match result {
                        Ok(()) => {
                            self.session.mark_saved();
                            self.error = None;
                            if self.close_after_save {
                                self.confirm_close = false;
                                self.force_close(ctx);
                            }
                        }
                        Err(err) => {
                            // The dirty flag stays set; the guard keeps warning.
                            self.close_after_save = false;
                            self.error = Some(err.to_string());
                        }
                    }
                }
            }
        }
    }

    /// Explicit user save. Saves while one is already in flight coalesce
    /// into a no-op so requests cannot race destructively.
    fn request_save(&mut self, ctx: &egui::Context) {
        if !self.session.is_loaded() || self.save_in_flight {
            return;
        }

        let body = self.session.save_body(&self.surface);
        self.save_in_flight = true;
        net::store_content(ctx, &self.event_tx, &self.content_url(), body);
    }

    fn force_close(&mut self, ctx: &egui::Context) {
        self.allow_close = true;
        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
    }

    fn show_status_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            let mut clear_error = false;
            let mut save_requested = false;

            ui.horizontal(|ui| {
                ui.label(self.session.file_id().to_string());

                ui.separator();

                let can_save = self.session.is_loaded() && !self.save_in_flight;
                if ui.add_enabled(can_save, egui::Button::new("Save")).clicked() {
                    save_requested = true;
                }
                if self.save_in_flight {
                    ui.label("Saving...");
                }

                if self.session.is_dirty() {
                    ui.separator();
                    ui.colored_label(ui.visuals().warn_fg_color, "Modified");
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if let Some(error) = self.error.as_deref() {
                        if ui.button("x").clicked() {
                            clear_error = true;
                        }
                        ui.colored_label(ui.visuals().error_fg_color, error);
                    }
                });
            });

            if clear_error {
                self.error = None;
            }
            if save_requested {
                self.request_save(ui.ctx());
            }
        });
    }

    fn show_editor(&mut self, ui: &mut egui::Ui) {
        let editor = egui::TextEdit::multiline(self.surface.text_mut())
            .desired_width(f32::INFINITY)
            .font(egui::TextStyle::Monospace)
            .frame(false)
            .id(egui::Id::new("editor"));

        let response = ui.add_sized(ui.available_size(), editor);

        if response.changed() {
            self.session.note_edit(&mut self.surface);
        }
    }

    fn show_close_dialog(&mut self, ctx: &egui::Context) {
        if !self.confirm_close {
            return;
        }

        let escape = ctx.input(|i| i.key_pressed(egui::Key::Escape));
        if escape {
            self.confirm_close = false;
            self.close_after_save = false;
            return;
        }

        egui::Window::new("Unsaved changes")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .show(ctx, |ui| {
                ui.label(format!(
                    "\"{}\" has unsaved changes that will be discarded.",
                    self.session.file_id()
                ));
                ui.add_space(8.0);

                ui.horizontal(|ui| {
                    let saving = self.save_in_flight;
                    if ui.add_enabled(!saving, egui::Button::new("Save")).clicked() {
                        self.close_after_save = true;
                        self.request_save(ui.ctx());
                    }

                    if ui.button("Discard").clicked() {
                        self.confirm_close = false;
                        self.force_close(ui.ctx());
                    }

                    if ui.button("Cancel").clicked() {
                        self.confirm_close = false;
                        self.close_after_save = false;
                    }
                });
            });
    }

    fn update_viewport_title(&self, ctx: &egui::Context) {
        ctx.send_viewport_cmd(egui::ViewportCommand::Title(format!(
            "remotepad - {}{}",
            self.session.file_id(),
            if self.session.is_dirty() { "*" } else { "" }
        )));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Option<LaunchOptions> {
        parse_launch_options(args.iter().copied().map(OsString::from))
    }

    #[test]
    fn parse_launch_options_takes_the_first_argument() {
        assert_eq!(parse(&[]), None);

        let options = parse(&["http://host/files/Kx3", "ignored"]);
        assert_eq!(
            options.map(|o| o.page_url),
            Some(OsString::from("http://host/files/Kx3"))
        );
    }

    #[test]
    fn close_guard_prompts_exactly_for_dirty_unapproved_closes() {
        // (close_requested, allow_close, dirty) -> intercept?
        let cases = [
            (true, false, true, true),
            (true, false, false, false),
            (true, true, true, false),
            (false, false, true, false),
        ];
        for (close_requested, allow_close, dirty, expected) in cases {
            assert_eq!(
                should_guard_close(close_requested, allow_close, dirty),
                expected,
                "close_requested={close_requested} allow_close={allow_close} dirty={dirty}"
            );
        }
    }

    #[test]
    fn launch_address_resolves_origin_and_file_id() {
        let parsed = parse(&["http://host:8080/~user/Kx3"])
            .as_ref()
            .and_then(|options| options.page_url.to_str())
            .and_then(remote::split_page_url);

        assert_eq!(
            parsed,
            FileId::new("Kx3").map(|id| ("http://host:8080".to_owned(), id))
        );
    }
}
