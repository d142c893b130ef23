use super::fields::{render_field, render_quantum_field};
use super::profile::{OpticalCard, ProtocolProfile, RunSettings};
use crate::domain::{CodecResult, StateInput};
use crate::potential::DerivedParameters;

pub(super) struct RenderedBlock {
    pub(super) lines: Vec<String>,
    pub(super) warnings: Vec<String>,
}

/// Assembles one state's complete card block. The card order is a wire
/// contract: the engine reads lines positionally, so every card below must
/// appear exactly once, in this order.
pub(super) fn render_state_block(
    profile: &ProtocolProfile,
    run: &RunSettings,
    state: &StateInput,
    derived: &DerivedParameters,
) -> CodecResult<RenderedBlock> {
    let mut writer = CardWriter::new(profile);

    let mut title = pad_to_columns(&derived.control_code, profile.control_columns);
    title.push_str(&format!(
        "{}    {:.0} keV  {} {}",
        run.reaction_label, state.excitation_kev, state.orbital, derived.marker
    ));
    writer.push(title);

    let angle_card =
        writer.numeric_row("angle card", &[run.angle_count, run.angle_start, run.angle_step])?;
    writer.push(angle_card);

    let quantum_card = [
        derived.max_l,
        run.transfer_count,
        state.l_transfer as i32,
        state.j2_transfer as i32,
    ]
    .into_iter()
    .map(|value| render_quantum_field(value, profile.quantum_width))
    .collect::<String>();
    writer.push(quantum_card);

    let integration_card = writer.numeric_row(
        "integration card",
        &[run.radial_step, run.radial_origin, derived.radial_bound],
    )?;
    writer.push(integration_card);

    writer.push(run.entrance_identity_card.clone());
    let volume_card = writer.optical_card("entrance volume card", &run.entrance_volume)?;
    writer.push(volume_card);
    let mut entrance_surface = run.entrance_surface;
    entrance_surface.second.depth = derived.entrance_imaginary_surface;
    let surface_card = writer.optical_card("entrance surface card", &entrance_surface)?;
    writer.push(surface_card);
    let spin_orbit_card =
        writer.optical_card("entrance spin-orbit card", &run.entrance_spin_orbit)?;
    writer.push(spin_orbit_card);

    let q_field = writer.field("exit identity card", state.q_value_mev)?;
    writer.push(format!("{}{}", q_field, run.exit_identity_tail));
    let mut exit_volume = run.exit_volume;
    exit_volume.first.depth = derived.exit_depths.real_volume;
    let exit_volume_card = writer.optical_card("exit volume card", &exit_volume)?;
    writer.push(exit_volume_card);
    let mut exit_surface = run.exit_surface;
    exit_surface.second.depth = derived.exit_depths.imaginary_surface;
    let exit_surface_card = writer.optical_card("exit surface card", &exit_surface)?;
    writer.push(exit_surface_card);
    let mut exit_spin_orbit = run.exit_spin_orbit;
    exit_spin_orbit.first.depth = derived.exit_depths.real_spin_orbit;
    exit_spin_orbit.second.depth = derived.exit_depths.imaginary_spin_orbit;
    let exit_spin_orbit_card = writer.optical_card("exit spin-orbit card", &exit_spin_orbit)?;
    writer.push(exit_spin_orbit_card);

    let binding_field = writer.field("binding-energy card", state.binding_energy_mev)?;
    writer.push(format!("{}{}", binding_field, run.binding_identity_tail));
    writer.push(run.bound_shape_card.clone());

    let bound_quantum_card = writer.numeric_row(
        "bound-state quantum card",
        &[
            state.nodes as f64,
            state.l_transfer as f64,
            state.j2_transfer as f64,
            run.structure_weight,
            run.matching_switch,
        ],
    )?;
    writer.push(bound_quantum_card);

    Ok(writer.finish())
}

struct CardWriter<'a> {
    profile: &'a ProtocolProfile,
    lines: Vec<String>,
    warnings: Vec<String>,
}

impl<'a> CardWriter<'a> {
    fn new(profile: &'a ProtocolProfile) -> Self {
        Self {
            profile,
            lines: Vec::new(),
            warnings: Vec::new(),
        }
    }

    fn field(&mut self, card: &str, value: f64) -> CodecResult<String> {
        let rendered = render_field(value, self.profile.field_width, self.profile.field_decimals)?;
        if rendered.precision_loss {
            self.warnings.push(format!(
                "{}: value {} rendered with reduced precision as '{}'",
                card,
                value,
                rendered.text.trim_end()
            ));
        }
        Ok(rendered.text)
    }

    fn numeric_row(&mut self, card: &str, values: &[f64]) -> CodecResult<String> {
        let mut row = String::with_capacity(values.len() * self.profile.field_width);
        for value in values {
            row.push_str(&self.field(card, *value)?);
        }
        Ok(row)
    }

    fn optical_card(&mut self, card: &str, optical: &OpticalCard) -> CodecResult<String> {
        let mut line = self.field(card, optical.shape_code)?;
        for triplet in [optical.first, optical.second] {
            line.push_str(&self.field(card, triplet.depth)?);
            line.push_str(&self.field(card, triplet.radius)?);
            line.push_str(&self.field(card, triplet.diffuseness)?);
            if line.len() == self.profile.field_width * 4 {
                // unused columns between the real and imaginary groups
                line.push_str(&" ".repeat(self.profile.field_width));
            }
        }
        Ok(line)
    }

    fn push(&mut self, mut line: String) {
        if self.profile.pad_cards {
            while line.len() < self.profile.card_width {
                line.push(' ');
            }
        }
        self.lines.push(line);
    }

    fn finish(self) -> RenderedBlock {
        RenderedBlock {
            lines: self.lines,
            warnings: self.warnings,
        }
    }
}

fn pad_to_columns(text: &str, columns: usize) -> String {
    let mut padded: String = text.chars().take(columns).collect();
    while padded.len() < columns {
        padded.push(' ');
    }
    padded
}
