use std::time::Duration;

use crossbeam_channel::{Receiver, Sender};
use eframe::egui;

use client_core::{CustomerDraft, DirectoryState};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorCategory, UiErrorContext, UiEvent};
use crate::controller::orchestration::dispatch_backend_command;

#[derive(Debug, Clone)]
pub struct StartupConfig {
    pub server_url: String,
}

impl Default for StartupConfig {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:8080".to_string(),
        }
    }
}

fn err_label(category: UiErrorCategory) -> &'static str {
    match category {
        UiErrorCategory::Transport => "Transport",
        UiErrorCategory::Server => "Server",
        UiErrorCategory::Unknown => "Unexpected",
    }
}

pub struct ClienteleApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,

    directory: DirectoryState,
    draft: CustomerDraft,

    status: String,
    initial_fetch_dispatched: bool,
}

impl ClienteleApp {
    pub fn bootstrap(cmd_tx: Sender<BackendCommand>, ui_rx: Receiver<UiEvent>) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            directory: DirectoryState::new(),
            draft: CustomerDraft::new(),
            status: "Connecting to customer directory".to_string(),
            initial_fetch_dispatched: false,
        }
    }

    fn request_fetch(&mut self) {
        self.directory.fetch_started();
        dispatch_backend_command(
            &self.cmd_tx,
            BackendCommand::FetchCustomers,
            &mut self.status,
        );
    }

    fn submit_draft(&mut self) {
        if let Some(payload) = self.draft.submit_payload() {
            dispatch_backend_command(
                &self.cmd_tx,
                BackendCommand::CreateCustomer { payload },
                &mut self.status,
            );
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::CustomersLoaded(customers) => {
                    self.directory.fetch_succeeded(customers);
                    self.status = format!("Showing {}", self.directory.count_label());
                }
                UiEvent::CustomersFetchFailed(err) => {
                    self.directory.fetch_failed(err.message());
                    self.status = format!("{} error: {}", err_label(err.category()), err.message());
                }
                UiEvent::CustomerCreated => {
                    self.draft.close();
                    self.status = "Customer created".to_string();
                    self.request_fetch();
                }
                UiEvent::CustomerCreateFailed => {
                    // Swallowed: the dialog stays open with the typed values.
                }
                UiEvent::Error(err) => {
                    self.status = format!("{} error: {}", err_label(err.category()), err.message());
                    // A startup failure means no fetch will ever land; take
                    // over the directory area with the error view.
                    if err.context() == UiErrorContext::BackendStartup {
                        self.directory.fetch_failed(err.message());
                    }
                }
            }
        }
    }

    fn show_header(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            match self.directory.customers() {
                Some(_) => ui.heading(self.directory.count_label()),
                None => ui.heading("Customers"),
            };
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("Add Customer").clicked() {
                    self.draft.open();
                }
                let refresh =
                    ui.add_enabled(!self.directory.is_loading(), egui::Button::new("Refresh"));
                if refresh.clicked() {
                    self.request_fetch();
                }
            });
        });
    }

    fn show_directory(&mut self, ui: &mut egui::Ui) {
        if let Some(error) = self.directory.error() {
            ui.add_space(12.0);
            ui.label(
                egui::RichText::new(format!("Error: {error}"))
                    .color(ui.visuals().error_fg_color)
                    .size(16.0),
            );
            return;
        }

        let Some(customers) = self.directory.customers() else {
            ui.add_space(12.0);
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label("Loading customers...");
            });
            return;
        };

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                egui::Grid::new("customer_table")
                    .num_columns(2)
                    .striped(true)
                    .spacing([32.0, 6.0])
                    .show(ui, |ui| {
                        ui.strong("Name");
                        ui.strong("Email");
                        ui.end_row();
                        for customer in customers {
                            ui.label(customer.display_name());
                            ui.label(&customer.email);
                            ui.end_row();
                        }
                    });
            });
    }

    fn form_text_field(ui: &mut egui::Ui, label: &str, value: &mut String) -> egui::Response {
        ui.label(egui::RichText::new(label).strong());
        let response = ui.add(egui::TextEdit::singleline(value).desired_width(f32::INFINITY));
        ui.add_space(4.0);
        response
    }

    fn show_add_customer_window(&mut self, ctx: &egui::Context) {
        if !self.draft.is_open() {
            return;
        }

        let mut cancel_requested = false;
        let mut submit_requested = false;

        egui::Window::new("Add Customer")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                ui.set_min_width(320.0);

                Self::form_text_field(ui, "First name", &mut self.draft.first_name);
                Self::form_text_field(ui, "Last name", &mut self.draft.last_name);
                Self::form_text_field(ui, "Business name (optional)", &mut self.draft.business_name);
                let email_response = Self::form_text_field(ui, "Email", &mut self.draft.email);
                if email_response.changed() {
                    self.draft.email_edited();
                }
                if let Some(helper) = self.draft.email_error() {
                    ui.label(
                        egui::RichText::new(helper)
                            .color(ui.visuals().error_fg_color)
                            .small(),
                    );
                }

                ui.add_space(8.0);
                ui.separator();
                ui.horizontal(|ui| {
                    if ui.button("Cancel").clicked() {
                        cancel_requested = true;
                    }
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let save =
                            ui.add_enabled(self.draft.can_submit(), egui::Button::new("Save"));
                        if save.clicked() {
                            submit_requested = true;
                        }
                    });
                });
            });

        if cancel_requested {
            self.draft.close();
        } else if submit_requested {
            self.submit_draft();
        }
    }
}

impl eframe::App for ClienteleApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if !self.initial_fetch_dispatched {
            self.initial_fetch_dispatched = true;
            self.request_fetch();
        }
        self.process_ui_events();

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.add_space(6.0);
            self.show_header(ui);
            ui.add_space(6.0);
        });
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.small("Status:");
                ui.small(egui::RichText::new(&self.status).weak());
            });
        });
        egui::CentralPanel::default().show(ctx, |ui| {
            self.show_directory(ui);
        });
        self.show_add_customer_window(ctx);

        // Worker events arrive outside egui's input loop; keep repainting so
        // they are drained promptly.
        ctx.request_repaint_after(Duration::from_millis(200));
    }
}
