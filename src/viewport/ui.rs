// src/viewport/ui.rs
use super::overlay::OVERLAY_DEPTH_NOTE;
use super::settings::{GridSettings, SETTINGS_PATH};
use crate::grid::{DerivativeMode, GridParameters, GridPlane};
use bevy::prelude::*;
use bevy_egui::EguiContexts;
use egui::{ComboBox, Slider, Ui, Window};

fn color_rgba(ui: &mut Ui, label: &str, color: &mut Vec4) {
    ui.horizontal(|ui| {
        let mut rgba = color.to_array();
        if ui.color_edit_button_rgba_unmultiplied(&mut rgba).changed() {
            *color = Vec4::from_array(rgba);
        }
        ui.label(label);
    });
}

fn color_rgb(ui: &mut Ui, label: &str, color: &mut Vec3) {
    ui.horizontal(|ui| {
        let mut rgb = color.to_array();
        if ui.color_edit_button_rgb(&mut rgb).changed() {
            *color = Vec3::from_array(rgb);
        }
        ui.label(label);
    });
}

fn line_parameters(ui: &mut Ui, params: &mut GridParameters) {
    ui.add(
        Slider::new(&mut params.scale, 0.01..=100.0)
            .logarithmic(true)
            .text("Scale"),
    );
    ui.add(
        Slider::new(&mut params.major_grid_factor, 1.0..=100.0)
            .step_by(1.0)
            .text("Major grid factor"),
    );
    ui.add(Slider::new(&mut params.minor_line_width, 0.0..=0.5).text("Minor line width"));
    ui.add(Slider::new(&mut params.major_line_width, 0.0..=0.5).text("Major line width"));
    ui.add(Slider::new(&mut params.axis_line_width, 0.0..=0.5).text("Axis line width"));
    ui.add(Slider::new(&mut params.opacity, 0.0..=1.0).text("Opacity"));
    ui.label(format!("Major period: {:.3}", params.period()));
}

fn color_parameters(ui: &mut Ui, params: &mut GridParameters) {
    color_rgba(ui, "Minor lines", &mut params.minor_line_color);
    color_rgba(ui, "Major lines", &mut params.major_line_color);
    color_rgb(ui, "X axis", &mut params.x_axis_color);
    color_rgb(ui, "Y axis", &mut params.y_axis_color);
    color_rgb(ui, "Z axis", &mut params.z_axis_color);
    color_rgb(ui, "Center", &mut params.center_color);
}

pub fn grid_control_ui_system(mut contexts: EguiContexts, mut settings: ResMut<GridSettings>) {
    // Arbeitskopie, damit die Change-Detection nur bei echten Änderungen auslöst
    let mut edited = settings.clone();

    Window::new("Grid")
        .default_width(320.0)
        .show(contexts.ctx_mut(), |ui| {
            ui.checkbox(&mut edited.enabled, "Show grid");

            ComboBox::from_label("Plane")
                .selected_text(edited.plane.label())
                .show_ui(ui, |ui| {
                    for plane in GridPlane::ALL {
                        ui.selectable_value(&mut edited.plane, plane, plane.label());
                    }
                });

            ui.collapsing("Lines", |ui| line_parameters(ui, &mut edited.params));
            ui.collapsing("Colors", |ui| color_parameters(ui, &mut edited.params));

            ui.collapsing("Rendering", |ui| {
                ComboBox::from_label("Derivatives")
                    .selected_text(edited.derivative_mode.label())
                    .show_ui(ui, |ui| {
                        for mode in [DerivativeMode::Central, DerivativeMode::Forward] {
                            ui.selectable_value(&mut edited.derivative_mode, mode, mode.label());
                        }
                    });
                ui.add(
                    Slider::new(&mut edited.resolution_scale, 0.1..=1.0).text("Resolution scale"),
                );
                ui.add(
                    Slider::new(&mut edited.half_extent, 10.0..=10_000.0)
                        .logarithmic(true)
                        .text("Plane half extent"),
                );
                ui.checkbox(&mut edited.follow_camera, "Follow camera");
                ui.small(OVERLAY_DEPTH_NOTE);
            });

            ui.separator();
            ui.horizontal(|ui| {
                if ui.button("Reset").clicked() {
                    edited = GridSettings::default();
                    info!("Grid settings reset to defaults");
                }
                if ui.button("Save").clicked() {
                    match edited.save(SETTINGS_PATH) {
                        Ok(()) => info!("Grid settings saved to {SETTINGS_PATH}"),
                        Err(err) => error!("Saving grid settings failed: {err}"),
                    }
                }
            });
        });

    if edited != *settings {
        *settings = edited;
    }
}
