//! Main Flotilla panel
//!
//! Owns the page model, the interaction coordinator, and the fragment
//! worker. Every frame: drain worker messages into lifecycle events, tick
//! the coordinator's timers, then render the page.

use std::time::{Duration, Instant};

use eframe::egui;

use crate::coordinator::debounce::QUIET_WINDOW;
use crate::coordinator::Coordinator;
use crate::fragment::{
    DemoSource, FragmentMessage, FragmentRequest, FragmentWorker, LifecycleEvent,
    REGION_ITINERARIOS, REGION_RESUMEN,
};
use crate::gui::{colors, dialogs};
use crate::logging;
use crate::page::{
    AlertBanner, ButtonFace, Page, Region, RegionBody, SearchForm, Severity, SubmitButton,
};
use crate::{format_fecha, format_guaranies, AppConfig};

/// Main application state
pub struct FlotillaApp {
    page: Page,
    coordinator: Coordinator,
    worker: FragmentWorker,
    /// Text of the search input.
    search_query: String,
    /// Declarative submit binding: fires the results request one quiet
    /// window after the last keystroke.
    pending_submit: Option<Instant>,
    /// Status bar message
    status_message: String,
    /// Show about dialog
    show_about: bool,
}

impl FlotillaApp {
    /// Create the panel and kick off the initial fragment requests.
    pub fn new(_cc: &eframe::CreationContext<'_>, config: AppConfig) -> Self {
        let page = initial_page(&config);
        let coordinator = Coordinator::start(&page, Instant::now());
        let worker =
            FragmentWorker::spawn(DemoSource::with_latency(Duration::from_millis(
                config.demo_latency_ms,
            )));

        let mut app = Self {
            page,
            coordinator,
            worker,
            search_query: String::new(),
            pending_submit: None,
            status_message: "Listo".to_string(),
            show_about: false,
        };

        if config.auto_refresh {
            app.request_region(REGION_RESUMEN, None);
            app.request_region(REGION_ITINERARIOS, None);
        }

        app
    }

    /// Issue a fragment request for a region, emitting the before-request
    /// event first.
    fn request_region(&mut self, region: &str, query: Option<String>) {
        self.coordinator.on_lifecycle(
            &LifecycleEvent::BeforeRequest {
                target: Some(region.to_string()),
            },
            &mut self.page,
        );

        let request = FragmentRequest {
            region: region.to_string(),
            query,
        };
        if self.worker.request(request).is_err() {
            logging::error("APP", &format!("fragment worker gone, region '{}'", region));
            self.coordinator.on_lifecycle(
                &LifecycleEvent::AfterRequest {
                    target: Some(region.to_string()),
                },
                &mut self.page,
            );
            self.status_message = "El servicio de datos no responde".to_string();
        }
    }

    fn reload_all(&mut self) {
        self.request_region(REGION_RESUMEN, None);
        let query = active_query(&self.search_query);
        self.request_region(REGION_ITINERARIOS, query);
    }

    /// Drain completed fragments into lifecycle events and swaps.
    fn process_messages(&mut self) {
        let now = Instant::now();
        while let Some(msg) = self.worker.try_recv() {
            match msg {
                FragmentMessage::Ready(fragment) => {
                    let id = fragment.id.clone();
                    self.coordinator.on_lifecycle(
                        &LifecycleEvent::AfterRequest {
                            target: Some(id.clone()),
                        },
                        &mut self.page,
                    );
                    if self.page.swap_region(fragment) {
                        self.coordinator.on_lifecycle(
                            &LifecycleEvent::AfterSwap { target: id.clone() },
                            &mut self.page,
                        );
                        self.status_message = region_summary(&self.page, &id);
                    } else {
                        logging::warn("APP", &format!("fragment for unknown region '{}'", id));
                    }
                }
                FragmentMessage::Failed { region, message } => {
                    self.coordinator.on_lifecycle(
                        &LifecycleEvent::AfterRequest {
                            target: Some(region.clone()),
                        },
                        &mut self.page,
                    );
                    logging::error("APP", &format!("region '{}': {}", region, message));
                    self.coordinator
                        .show_toast(&format!("No se pudo actualizar: {}", message), Severity::Danger, now);
                }
            }
        }
    }

    /// Fire the declarative submit binding once the quiet window elapses.
    fn poll_pending_submit(&mut self, now: Instant) {
        if let Some(deadline) = self.pending_submit {
            if now >= deadline {
                self.pending_submit = None;
                let query = active_query(&self.search_query);
                self.request_region(REGION_ITINERARIOS, query);
            }
        }
    }

    /// Render menu bar
    fn render_menu(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("Archivo", |ui| {
                    if ui.button("Actualizar resumen").clicked() {
                        self.request_region(REGION_RESUMEN, None);
                        ui.close_menu();
                    }
                    if ui.button("Recargar todo").clicked() {
                        let mut accepted = false;
                        dialogs::confirm_then(
                            "Recargar todo",
                            "¿Desea recargar todos los datos del panel?",
                            || accepted = true,
                        );
                        if accepted {
                            self.reload_all();
                        }
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Salir").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });

                ui.menu_button("Edición", |ui| {
                    if ui.button("Copiar estado").clicked() {
                        if let Ok(mut clipboard) = arboard::Clipboard::new() {
                            let _ = clipboard.set_text(&self.status_message);
                        }
                        ui.close_menu();
                    }
                });

                ui.menu_button("Ayuda", |ui| {
                    if ui.button("Acerca de Flotilla").clicked() {
                        self.show_about = true;
                        ui.close_menu();
                    }
                });
            });
        });
    }

    /// Render search bar with debounced busy feedback
    fn render_search_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("search_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label("Buscar:");
                let now = Instant::now();
                let response = ui.add(
                    egui::TextEdit::singleline(&mut self.search_query)
                        .desired_width(ui.available_width() - 120.0)
                        .hint_text("Origen o destino..."),
                );

                if response.changed() {
                    self.coordinator.search_input("search", &mut self.page, now);
                    self.pending_submit = Some(now + QUIET_WINDOW);
                }

                let face = self
                    .page
                    .form("search")
                    .and_then(|f| f.button.as_ref())
                    .map(|b| b.face)
                    .unwrap_or_default();
                match face {
                    ButtonFace::Busy => {
                        ui.spinner();
                        ui.add_enabled(false, egui::Button::new("Buscar"));
                    }
                    ButtonFace::Idle => {
                        if ui.button("\u{1F50D} Buscar").clicked() {
                            self.pending_submit = None;
                            let query = active_query(&self.search_query);
                            self.request_region(REGION_ITINERARIOS, query);
                        }
                    }
                }
            });
        });
    }

    /// Render visible alert banners
    fn render_alerts(&mut self, ui: &mut egui::Ui) {
        let mut dismissed: Option<String> = None;
        for alert in self.page.alerts.iter().filter(|a| a.visible) {
            egui::Frame::new()
                .fill(colors::severity_fill(alert.severity))
                .corner_radius(egui::CornerRadius::same(4))
                .inner_margin(egui::Margin::same(8))
                .show(ui, |ui| {
                    ui.horizontal(|ui| {
                        ui.colored_label(
                            colors::severity_text(alert.severity),
                            format!("{} {}", colors::severity_icon(alert.severity), alert.text),
                        );
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            if alert.dismissible && ui.small_button("\u{2715}").clicked() {
                                dismissed = Some(alert.id.clone());
                            }
                        });
                    });
                });
            ui.add_space(4.0);
        }
        if let Some(id) = dismissed {
            self.page.dismiss_alert(&id);
        }
    }

    /// Render all page regions
    fn render_regions(&mut self, ui: &mut egui::Ui) {
        let regions = self.page.regions.clone();
        for region in &regions {
            ui.heading(&region.title);
            if region.loading {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.weak("Cargando...");
                });
                ui.add_space(8.0);
                continue;
            }
            match &region.body {
                RegionBody::Pendiente => {
                    ui.weak("Sin datos todavía.");
                }
                RegionBody::Text(text) => {
                    ui.label(text);
                }
                RegionBody::Stats(stats) => {
                    ui.horizontal_wrapped(|ui| {
                        for stat in stats {
                            let widget_id = format!("{}/{}", region.id, stat.id);
                            let response = ui
                                .group(|ui| {
                                    ui.vertical(|ui| {
                                        ui.colored_label(colors::stat_accent(), &stat.value);
                                        ui.small(&stat.label);
                                    });
                                })
                                .response;
                            if let Some(hint) = self.coordinator.tooltips().hint_for(&widget_id) {
                                response.on_hover_text(hint);
                            }
                        }
                    });
                }
                RegionBody::Itinerarios(rows) => {
                    self.render_itinerarios_table(ui, rows);
                }
            }
            ui.add_space(8.0);
        }
    }

    /// Render the itinerary results table
    fn render_itinerarios_table(&self, ui: &mut egui::Ui, rows: &[crate::page::ItineraryRow]) {
        use egui_extras::{Column, TableBuilder};

        if rows.is_empty() {
            ui.weak("Ningún itinerario coincide con la búsqueda.");
            return;
        }

        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
            .column(Column::initial(160.0).at_least(40.0).clip(true))
            .column(Column::initial(160.0).at_least(40.0).clip(true))
            .column(Column::initial(150.0).at_least(40.0).clip(true))
            .column(Column::remainder().at_least(40.0))
            .header(20.0, |mut header| {
                header.col(|ui| {
                    ui.strong("Origen");
                });
                header.col(|ui| {
                    ui.strong("Destino");
                });
                header.col(|ui| {
                    ui.strong("Salida");
                });
                header.col(|ui| {
                    ui.strong("Precio");
                });
            })
            .body(|mut body| {
                for row in rows {
                    body.row(18.0, |mut table_row| {
                        table_row.col(|ui| {
                            ui.label(&row.origen);
                        });
                        table_row.col(|ui| {
                            ui.label(&row.destino);
                        });
                        table_row.col(|ui| {
                            let salida = format_fecha(&row.salida)
                                .unwrap_or_else(|_| row.salida.clone());
                            ui.label(salida);
                        });
                        table_row.col(|ui| {
                            ui.label(format_guaranies(row.precio));
                        });
                    });
                }
            });
    }

    /// Render the toast container, anchored bottom-right
    fn render_toasts(&self, ctx: &egui::Context, now: Instant) {
        if self.coordinator.toasts().is_empty() {
            return;
        }
        egui::Area::new(egui::Id::new("toast_container"))
            .anchor(egui::Align2::RIGHT_BOTTOM, [-12.0, -36.0])
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                for toast in self.coordinator.toasts() {
                    ui.scope(|ui| {
                        ui.set_opacity(toast.opacity(now));
                        egui::Frame::new()
                            .fill(colors::severity_fill(toast.severity))
                            .corner_radius(egui::CornerRadius::same(4))
                            .inner_margin(egui::Margin::same(8))
                            .show(ui, |ui| {
                                ui.colored_label(
                                    colors::severity_text(toast.severity),
                                    format!(
                                        "{} {}",
                                        colors::severity_icon(toast.severity),
                                        toast.message
                                    ),
                                );
                            });
                    });
                    ui.add_space(4.0);
                }
            });
    }

    /// Render status bar
    fn render_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if self.page.regions.iter().any(|r| r.loading) {
                    ui.spinner();
                    ui.label("Actualizando...");
                } else {
                    ui.label(&self.status_message);
                }
            });
        });
    }

    /// Render about dialog
    fn render_about_dialog(&mut self, ctx: &egui::Context) {
        if self.show_about {
            egui::Window::new("Acerca de Flotilla")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.heading("Flotilla");
                        ui.label(format!("Versión {}", crate::VERSION));
                        ui.add_space(10.0);
                        ui.label("Panel de gestión de flota de buses");
                        ui.label("Dashboard, itinerarios y notificaciones");
                        ui.add_space(10.0);
                        if ui.button("OK").clicked() {
                            self.show_about = false;
                        }
                    });
                });
        }
    }

    /// Schedule the next repaint from the coordinator's earliest deadline.
    fn schedule_repaint(&self, ctx: &egui::Context, now: Instant) {
        if self.page.regions.iter().any(|r| r.loading) {
            ctx.request_repaint();
            return;
        }
        let next = [self.coordinator.next_deadline(), self.pending_submit]
            .into_iter()
            .flatten()
            .min();
        if let Some(deadline) = next {
            ctx.request_repaint_after(deadline.saturating_duration_since(now));
        }
    }
}

impl eframe::App for FlotillaApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();

        self.process_messages();
        self.poll_pending_submit(now);
        self.coordinator.tick(&mut self.page, now);

        self.render_menu(ctx);
        self.render_search_bar(ctx);
        self.render_status_bar(ctx);
        self.render_about_dialog(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                self.render_alerts(ui);
                self.render_regions(ui);
            });
        });

        self.render_toasts(ctx, now);
        self.schedule_repaint(ctx, now);
    }
}

/// The page as it exists at load time, before any fragment arrives.
fn initial_page(config: &AppConfig) -> Page {
    let mut alerts = Vec::new();
    if config.show_welcome_alert {
        alerts.push(AlertBanner::new(
            "bienvenida",
            Severity::Info,
            "Bienvenido al panel de gestión de flota",
        ));
    }
    Page {
        regions: vec![
            Region::pending(REGION_RESUMEN, "Resumen"),
            Region::pending(REGION_ITINERARIOS, "Itinerarios"),
        ],
        alerts,
        forms: vec![SearchForm {
            input_name: "search".to_string(),
            target_region: REGION_ITINERARIOS.to_string(),
            button: Some(SubmitButton::default()),
        }],
    }
}

/// Trimmed query, or None when the input is blank.
fn active_query(raw: &str) -> Option<String> {
    let q = raw.trim();
    if q.is_empty() {
        None
    } else {
        Some(q.to_string())
    }
}

/// Status line for a freshly swapped region.
fn region_summary(page: &Page, region_id: &str) -> String {
    match page.region(region_id).map(|r| &r.body) {
        Some(RegionBody::Itinerarios(rows)) => format!("{} itinerarios", rows.len()),
        Some(RegionBody::Stats(stats)) => format!("Resumen actualizado ({} indicadores)", stats.len()),
        _ => "Actualizado".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_page_shape() {
        let page = initial_page(&AppConfig::default());
        assert!(page.region(REGION_RESUMEN).is_some());
        assert!(page.region(REGION_ITINERARIOS).is_some());
        assert_eq!(page.alerts.len(), 1);
        assert!(page.form("search").unwrap().button.is_some());
    }

    #[test]
    fn test_active_query_trims_blank() {
        assert_eq!(active_query("  "), None);
        assert_eq!(active_query(" asunción "), Some("asunción".to_string()));
    }
}
