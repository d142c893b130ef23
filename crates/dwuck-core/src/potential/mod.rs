use crate::domain::{BoundClass, CodecResult, DwuckError, StateInput};

/// One optical-model depth channel: a reference depth at the table's anchor
/// point plus a linear slope away from it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelAnchor {
    pub reference_depth: f64,
    pub slope_per_mev: f64,
}

impl ChannelAnchor {
    pub const fn new(reference_depth: f64, slope_per_mev: f64) -> Self {
        Self {
            reference_depth,
            slope_per_mev,
        }
    }

    fn depth_at_offset(self, offset_mev: f64) -> f64 {
        self.reference_depth + self.slope_per_mev * offset_mev
    }
}

/// Exit-channel depth table: four channels anchored at the ground-state exit
/// particle energy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExitDepthTable {
    pub reference_energy_mev: f64,
    pub real_volume: ChannelAnchor,
    pub imaginary_surface: ChannelAnchor,
    pub real_spin_orbit: ChannelAnchor,
    pub imaginary_spin_orbit: ChannelAnchor,
}

impl ExitDepthTable {
    /// Becchetti-Greenlees-style energy coefficients around the 36S(d,p)
    /// ground-state proton energy.
    pub const fn becchetti_greenlees_36s() -> Self {
        Self {
            reference_energy_mev: 9.438,
            real_volume: ChannelAnchor::new(-56.249, 0.32),
            imaginary_surface: ChannelAnchor::new(34.836, -0.25),
            real_spin_orbit: ChannelAnchor::new(-22.456, 0.01),
            imaginary_spin_orbit: ChannelAnchor::new(0.156, -0.005),
        }
    }

    pub fn depths_at(&self, energy_mev: f64) -> DerivedPotential {
        let offset = energy_mev - self.reference_energy_mev;
        DerivedPotential {
            real_volume: self.real_volume.depth_at_offset(offset),
            imaginary_surface: self.imaginary_surface.depth_at_offset(offset),
            real_spin_orbit: self.real_spin_orbit.depth_at_offset(offset),
            imaginary_spin_orbit: self.imaginary_spin_orbit.depth_at_offset(offset),
        }
    }
}

/// Entrance-channel imaginary-surface depth as a function of the reaction
/// Q-value. Same mechanism as the exit table, independent anchor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntranceSurfaceTable {
    pub reference_q_mev: f64,
    pub anchor: ChannelAnchor,
}

impl EntranceSurfaceTable {
    pub const fn daehnick_36s() -> Self {
        Self {
            reference_q_mev: 2.079,
            anchor: ChannelAnchor::new(42.340, -0.58),
        }
    }

    pub fn depth_at_q(&self, q_value_mev: f64) -> f64 {
        self.anchor.depth_at_offset(q_value_mev - self.reference_q_mev)
    }
}

/// Exit-channel depths derived for one state; recomputed per state, never
/// mutated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedPotential {
    pub real_volume: f64,
    pub imaginary_surface: f64,
    pub real_spin_orbit: f64,
    pub imaginary_spin_orbit: f64,
}

/// Per-classification engine controls. The radial bound's sign selects the
/// engine's continuum normalization: positive for bound states, negative for
/// unbound states.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationSettings {
    pub bound_control_code: String,
    pub unbound_control_code: String,
    pub bound_marker: String,
    pub unbound_marker: String,
    pub bound_max_l: i32,
    pub unbound_max_l: i32,
    pub bound_radial_bound: f64,
    pub unbound_radial_bound: f64,
}

impl ClassificationSettings {
    pub fn standard_zero_range() -> Self {
        Self {
            bound_control_code: "1001000000200000".to_string(),
            unbound_control_code: "1011000030000000".to_string(),
            bound_marker: "bound ZR".to_string(),
            unbound_marker: "unbound ZR".to_string(),
            bound_max_l: 30,
            unbound_max_l: 15,
            bound_radial_bound: 50.0,
            unbound_radial_bound: -15.0,
        }
    }
}

/// Everything the encoder needs that depends on the state's energies: the
/// bound/unbound decision and the depths interpolated for this state.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedParameters {
    pub class: BoundClass,
    pub control_code: String,
    pub marker: String,
    pub max_l: i32,
    pub radial_bound: f64,
    pub exit_depths: DerivedPotential,
    pub entrance_imaginary_surface: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParameterModel {
    exit_table: ExitDepthTable,
    entrance_table: EntranceSurfaceTable,
    classification: ClassificationSettings,
}

impl ParameterModel {
    pub fn new(
        exit_table: ExitDepthTable,
        entrance_table: EntranceSurfaceTable,
        classification: ClassificationSettings,
    ) -> CodecResult<Self> {
        if classification.bound_radial_bound <= 0.0 {
            return Err(DwuckError::internal(
                "MODEL.RADIAL_BOUND_SIGN",
                format!(
                    "bound radial bound must be positive, got {}",
                    classification.bound_radial_bound
                ),
            ));
        }
        if classification.unbound_radial_bound >= 0.0 {
            return Err(DwuckError::internal(
                "MODEL.RADIAL_BOUND_SIGN",
                format!(
                    "unbound radial bound must be negative to select continuum normalization, got {}",
                    classification.unbound_radial_bound
                ),
            ));
        }
        Ok(Self {
            exit_table,
            entrance_table,
            classification,
        })
    }

    pub fn standard() -> Self {
        Self {
            exit_table: ExitDepthTable::becchetti_greenlees_36s(),
            entrance_table: EntranceSurfaceTable::daehnick_36s(),
            classification: ClassificationSettings::standard_zero_range(),
        }
    }

    pub fn exit_reference_energy_mev(&self) -> f64 {
        self.exit_table.reference_energy_mev
    }

    pub fn reference_q_mev(&self) -> f64 {
        self.entrance_table.reference_q_mev
    }

    pub fn classification(&self) -> &ClassificationSettings {
        &self.classification
    }

    pub fn derive(&self, state: &StateInput) -> CodecResult<DerivedParameters> {
        state.validate()?;

        let class = state.classify();
        let settings = &self.classification;
        let (control_code, marker, max_l, radial_bound) = match class {
            BoundClass::Bound => (
                settings.bound_control_code.clone(),
                settings.bound_marker.clone(),
                settings.bound_max_l,
                settings.bound_radial_bound,
            ),
            BoundClass::Unbound => (
                settings.unbound_control_code.clone(),
                settings.unbound_marker.clone(),
                settings.unbound_max_l,
                settings.unbound_radial_bound,
            ),
        };

        Ok(DerivedParameters {
            class,
            control_code,
            marker,
            max_l,
            radial_bound,
            exit_depths: self.exit_table.depths_at(state.exit_energy_mev),
            entrance_imaginary_surface: self.entrance_table.depth_at_q(state.q_value_mev),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{
        ChannelAnchor, ClassificationSettings, EntranceSurfaceTable, ExitDepthTable,
        ParameterModel,
    };
    use crate::domain::{BoundClass, StateInput};

    fn ground_state() -> StateInput {
        StateInput {
            excitation_kev: 0.0,
            orbital: "0f7/2".to_string(),
            l_transfer: 3,
            j2_transfer: 7,
            nodes: 0,
            q_value_mev: 2.079,
            binding_energy_mev: -4.304,
            exit_energy_mev: 9.438,
        }
    }

    #[test]
    fn ground_state_depths_equal_the_reference_anchors_exactly() {
        let model = ParameterModel::standard();
        let derived = model.derive(&ground_state()).expect("ground state derives");

        let table = ExitDepthTable::becchetti_greenlees_36s();
        assert_eq!(
            derived.exit_depths.real_volume,
            table.real_volume.reference_depth
        );
        assert_eq!(
            derived.exit_depths.imaginary_surface,
            table.imaginary_surface.reference_depth
        );
        assert_eq!(
            derived.exit_depths.real_spin_orbit,
            table.real_spin_orbit.reference_depth
        );
        assert_eq!(
            derived.exit_depths.imaginary_spin_orbit,
            table.imaginary_spin_orbit.reference_depth
        );
        assert_eq!(
            derived.entrance_imaginary_surface,
            EntranceSurfaceTable::daehnick_36s().anchor.reference_depth
        );
    }

    #[test]
    fn depth_interpolation_is_linear_in_the_energy_offset() {
        let table = ExitDepthTable::becchetti_greenlees_36s();
        let shifted = table.depths_at(table.reference_energy_mev + 2.0);
        assert!(
            (shifted.real_volume - (table.real_volume.reference_depth + 2.0 * 0.32)).abs()
                < 1.0e-12
        );
        assert!(
            (shifted.imaginary_surface
                - (table.imaginary_surface.reference_depth - 2.0 * 0.25))
                .abs()
                < 1.0e-12
        );
    }

    #[test]
    fn entrance_surface_depth_tracks_the_q_offset() {
        let table = EntranceSurfaceTable::daehnick_36s();
        let depth = table.depth_at_q(table.reference_q_mev - 1.0);
        assert!((depth - (42.340 + 0.58)).abs() < 1.0e-12);
    }

    #[test]
    fn derivation_is_deterministic() {
        let model = ParameterModel::standard();
        let state = ground_state();
        let first = model.derive(&state).expect("first derivation");
        let second = model.derive(&state).expect("second derivation");
        assert_eq!(first, second);
    }

    #[test]
    fn bound_states_select_bound_controls() {
        let model = ParameterModel::standard();
        let derived = model.derive(&ground_state()).expect("bound state derives");
        assert_eq!(derived.class, BoundClass::Bound);
        assert_eq!(derived.control_code, "1001000000200000");
        assert_eq!(derived.marker, "bound ZR");
        assert_eq!(derived.max_l, 30);
        assert!(derived.radial_bound > 0.0);
    }

    #[test]
    fn zero_binding_energy_selects_unbound_controls() {
        let model = ParameterModel::standard();
        let mut state = ground_state();
        state.binding_energy_mev = 0.0;
        let derived = model.derive(&state).expect("threshold state derives");
        assert_eq!(derived.class, BoundClass::Unbound);
        assert_eq!(derived.control_code, "1011000030000000");
        assert_eq!(derived.marker, "unbound ZR");
        assert!(derived.radial_bound < 0.0);
    }

    #[test]
    fn invalid_state_aborts_only_that_derivation() {
        let model = ParameterModel::standard();
        let mut state = ground_state();
        state.j2_transfer = 4;
        let error = model.derive(&state).expect_err("even j2 should fail");
        assert_eq!(error.placeholder(), "INPUT.STATE_J2");
    }

    #[test]
    fn flipped_radial_bound_signs_are_rejected_at_construction() {
        let mut settings = ClassificationSettings::standard_zero_range();
        settings.unbound_radial_bound = 15.0;
        let error = ParameterModel::new(
            ExitDepthTable::becchetti_greenlees_36s(),
            EntranceSurfaceTable::daehnick_36s(),
            settings,
        )
        .expect_err("positive unbound bound must be rejected");
        assert_eq!(error.placeholder(), "MODEL.RADIAL_BOUND_SIGN");
    }

    #[test]
    fn channel_anchor_offsets_compose() {
        let anchor = ChannelAnchor::new(-56.249, 0.32);
        assert_eq!(anchor.depth_at_offset(0.0), -56.249);
        assert!((anchor.depth_at_offset(1.0) - (-55.929)).abs() < 1.0e-12);
    }
}
