/// Column-layout profile for the card-image protocol. The consuming engine
/// reads every card by fixed character position, so these widths are a wire
/// contract, not presentation. Divergent historical deck layouts are handled
/// by constructing a different profile, never by ad hoc string slicing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProtocolProfile {
    pub card_width: usize,
    pub control_columns: usize,
    pub field_width: usize,
    pub field_decimals: usize,
    pub quantum_width: usize,
    pub pad_cards: bool,
}

impl ProtocolProfile {
    /// The strict 80-column deck layout: 20 control columns, F8.3 numeric
    /// fields, 3-column signed quantum integers, every card padded to 80.
    pub const fn strict() -> Self {
        Self {
            card_width: 80,
            control_columns: 20,
            field_width: 8,
            field_decimals: 3,
            quantum_width: 3,
            pad_cards: true,
        }
    }

    /// Historical variant that leaves card tails unpadded.
    pub const fn unpadded() -> Self {
        let mut profile = Self::strict();
        profile.pad_cards = false;
        profile
    }
}

impl Default for ProtocolProfile {
    fn default() -> Self {
        Self::strict()
    }
}

/// Depth plus Woods-Saxon geometry for one optical-potential term.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OpticalTriplet {
    pub depth: f64,
    pub radius: f64,
    pub diffuseness: f64,
}

impl OpticalTriplet {
    pub const fn new(depth: f64, radius: f64, diffuseness: f64) -> Self {
        Self {
            depth,
            radius,
            diffuseness,
        }
    }

    pub const fn absent() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }
}

/// One optical-potential card: shape code plus two depth-geometry triplets
/// (real and imaginary term, in the engine's column order).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OpticalCard {
    pub shape_code: f64,
    pub first: OpticalTriplet,
    pub second: OpticalTriplet,
}

impl OpticalCard {
    pub const fn new(shape_code: f64, first: OpticalTriplet, second: OpticalTriplet) -> Self {
        Self {
            shape_code,
            first,
            second,
        }
    }
}

/// Run-wide constants shared by every state block in a deck: reaction label,
/// angle grid, identity-card tails, optical geometries, terminator. These are
/// configuration, not code; a different reaction system is a different
/// `RunSettings` value.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSettings {
    pub reaction_label: String,
    pub angle_count: f64,
    pub angle_start: f64,
    pub angle_step: f64,
    pub transfer_count: i32,
    pub radial_step: f64,
    pub radial_origin: f64,
    pub entrance_identity_card: String,
    pub entrance_volume: OpticalCard,
    pub entrance_surface: OpticalCard,
    pub entrance_spin_orbit: OpticalCard,
    pub exit_identity_tail: String,
    pub exit_volume: OpticalCard,
    pub exit_surface: OpticalCard,
    pub exit_spin_orbit: OpticalCard,
    pub binding_identity_tail: String,
    pub bound_shape_card: String,
    pub structure_weight: f64,
    pub matching_switch: f64,
    pub terminator: String,
}

impl RunSettings {
    /// 36S(d,p)37S at 8 MeV deuteron energy, zero-range.
    pub fn sulfur36_dp() -> Self {
        Self {
            reaction_label: "36S(d,p)@ 8MeV".to_string(),
            angle_count: 90.0,
            angle_start: 0.0,
            angle_step: 1.0,
            transfer_count: 1,
            radial_step: 0.1,
            radial_origin: 0.0,
            entrance_identity_card:
                "+08.000  2.0     1.0    36.0    16.0    001.303                  2.0    "
                    .to_string(),
            entrance_volume: OpticalCard::new(
                1.0,
                OpticalTriplet::new(-92.976, 1.150, 0.761),
                OpticalTriplet::new(-1.602, 1.335, 0.525),
            ),
            entrance_surface: OpticalCard::new(
                2.0,
                OpticalTriplet::absent(),
                OpticalTriplet::new(42.340, 1.380, 0.736),
            ),
            entrance_spin_orbit: OpticalCard::new(
                -4.0,
                OpticalTriplet::new(-14.228, 0.972, 1.011),
                OpticalTriplet::absent(),
            ),
            exit_identity_tail:
                "  1.0     1.0    37.0    16.0    001.292                 +01.    ".to_string(),
            exit_volume: OpticalCard::new(
                1.0,
                OpticalTriplet::new(-56.249, 1.182, 0.672),
                OpticalTriplet::new(-0.786, 1.182, 0.672),
            ),
            exit_surface: OpticalCard::new(
                2.0,
                OpticalTriplet::absent(),
                OpticalTriplet::new(34.836, 1.290, 0.538),
            ),
            exit_spin_orbit: OpticalCard::new(
                -4.0,
                OpticalTriplet::new(-22.456, 0.991, 0.590),
                OpticalTriplet::new(0.156, 0.991, 0.590),
            ),
            binding_identity_tail:
                "  1.0     0.0    36.0    16.0    +01.30                  +01.    ".to_string(),
            bound_shape_card: "-01.    -01.    +01.28  +00.65  24.0".to_string(),
            structure_weight: 1.0,
            matching_switch: 50.0,
            terminator: "9                   END OF DATA for DWUCK4".to_string(),
        }
    }
}

impl Default for RunSettings {
    fn default() -> Self {
        Self::sulfur36_dp()
    }
}
