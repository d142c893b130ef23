mod encoder;
pub mod fields;
pub mod profile;

pub use fields::{RenderedField, render_field, render_quantum_field};
pub use profile::{OpticalCard, OpticalTriplet, ProtocolProfile, RunSettings};

use crate::domain::{CodecResult, DwuckError, StateInput};
use crate::potential::ParameterModel;

/// One state's rendered card lines, in engine order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardBlock {
    pub state_index: usize,
    pub lines: Vec<String>,
}

/// The complete deck: every successfully encoded block plus one terminator
/// line. This is the unit written to storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardDocument {
    pub blocks: Vec<CardBlock>,
    pub terminator: String,
}

impl CardDocument {
    pub fn render(&self) -> String {
        let mut text = String::new();
        for block in &self.blocks {
            for line in &block.lines {
                text.push_str(line);
                text.push('\n');
            }
        }
        text.push_str(&self.terminator);
        text.push('\n');
        text
    }

    pub fn line_count(&self) -> usize {
        self.blocks.iter().map(|block| block.lines.len()).sum::<usize>() + 1
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedState {
    pub state_index: usize,
    pub reason: DwuckError,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldWarning {
    pub state_index: usize,
    pub detail: String,
}

/// Outcome of one encoding pass: the document plus the aggregate summary of
/// per-state recoveries. Nothing is silently dropped; every skipped state and
/// every lossy field rendering is recorded here.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodeReport {
    pub document: CardDocument,
    pub skipped: Vec<SkippedState>,
    pub warnings: Vec<FieldWarning>,
}

impl EncodeReport {
    pub fn encoded_count(&self) -> usize {
        self.document.blocks.len()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CardEncoder {
    profile: ProtocolProfile,
    run: RunSettings,
    model: ParameterModel,
}

impl CardEncoder {
    pub fn new(profile: ProtocolProfile, run: RunSettings, model: ParameterModel) -> Self {
        Self {
            profile,
            run,
            model,
        }
    }

    pub fn standard() -> Self {
        Self::new(
            ProtocolProfile::strict(),
            RunSettings::sulfur36_dp(),
            ParameterModel::standard(),
        )
    }

    pub fn profile(&self) -> &ProtocolProfile {
        &self.profile
    }

    pub fn run(&self) -> &RunSettings {
        &self.run
    }

    pub fn model(&self) -> &ParameterModel {
        &self.model
    }

    /// Encodes the batch in input order. A state that fails derivation or
    /// field rendering is skipped and recorded; zero successfully encoded
    /// states is a hard failure and nothing is produced.
    pub fn encode(&self, states: &[StateInput]) -> CodecResult<EncodeReport> {
        let mut blocks = Vec::with_capacity(states.len());
        let mut skipped = Vec::new();
        let mut warnings = Vec::new();

        for (state_index, state) in states.iter().enumerate() {
            let derived = match self.model.derive(state) {
                Ok(derived) => derived,
                Err(reason) => {
                    skipped.push(SkippedState {
                        state_index,
                        reason,
                    });
                    continue;
                }
            };

            match encoder::render_state_block(&self.profile, &self.run, state, &derived) {
                Ok(block) => {
                    warnings.extend(block.warnings.into_iter().map(|detail| FieldWarning {
                        state_index,
                        detail,
                    }));
                    blocks.push(CardBlock {
                        state_index,
                        lines: block.lines,
                    });
                }
                Err(reason) => skipped.push(SkippedState {
                    state_index,
                    reason,
                }),
            }
        }

        if blocks.is_empty() {
            return Err(DwuckError::empty_document(
                "CARD.EMPTY_DOCUMENT",
                format!(
                    "none of the {} input states could be encoded",
                    states.len()
                ),
            ));
        }

        Ok(EncodeReport {
            document: CardDocument {
                blocks,
                terminator: self.run.terminator.clone(),
            },
            skipped,
            warnings,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{CardEncoder, ProtocolProfile, RunSettings};
    use crate::domain::{DwuckErrorCategory, StateInput};
    use crate::potential::ParameterModel;

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

    fn unbound_state() -> StateInput {
        StateInput {
            excitation_kev: 5000.0,
            orbital: "0f7/2".to_string(),
            l_transfer: 3,
            j2_transfer: 7,
            nodes: 0,
            q_value_mev: -2.921,
            binding_energy_mev: 0.5,
            exit_energy_mev: 4.438,
        }
    }

    #[test]
    fn bound_state_block_carries_bound_controls_and_reference_surface_depth() {
        let report = CardEncoder::standard()
            .encode(&[ground_state()])
            .expect("ground state encodes");
        let block = &report.document.blocks[0];

        let title = &block.lines[0];
        assert!(title.starts_with("1001000000200000"));
        assert!(title.contains("36S(d,p)@ 8MeV"));
        assert!(title.contains("0 keV"));
        assert!(title.contains("0f7/2 bound ZR"));

        // exit proton energy equals the table anchor, so the imaginary
        // surface depth is the reference value verbatim
        let exit_surface = &block.lines[10];
        assert!(exit_surface.contains("+34.836"), "line was '{exit_surface}'");
        assert!(report.warnings.is_empty());
        assert!(report.skipped.is_empty());
    }

    #[test]
    fn unbound_state_block_flips_the_radial_bound_sign_only() {
        let report = CardEncoder::standard()
            .encode(&[unbound_state()])
            .expect("unbound state encodes");
        let block = &report.document.blocks[0];

        assert!(block.lines[0].starts_with("1011000030000000"));
        assert!(block.lines[0].contains("unbound ZR"));
        let integration = &block.lines[3];
        assert!(integration.contains("-15.000"), "line was '{integration}'");
    }

    #[test]
    fn every_card_in_the_strict_profile_is_exactly_80_columns() {
        let report = CardEncoder::standard()
            .encode(&[ground_state(), unbound_state()])
            .expect("batch encodes");
        for block in &report.document.blocks {
            assert_eq!(block.lines.len(), 15);
            for line in &block.lines {
                assert_eq!(line.len(), 80, "card drifted: '{line}'");
            }
        }
    }

    #[test]
    fn quantum_card_packs_four_signed_three_column_integers() {
        let report = CardEncoder::standard()
            .encode(&[ground_state()])
            .expect("ground state encodes");
        let quantum = &report.document.blocks[0].lines[2];
        assert!(quantum.starts_with("+30+01+03+07"));
    }

    #[test]
    fn q_value_and_binding_cards_use_the_signed_field_primitive() {
        let report = CardEncoder::standard()
            .encode(&[ground_state()])
            .expect("ground state encodes");
        let block = &report.document.blocks[0];
        assert!(block.lines[8].starts_with("+2.079  "));
        assert!(block.lines[12].starts_with("-4.304  "));
    }

    #[test]
    fn document_ends_with_the_terminator_line() {
        let report = CardEncoder::standard()
            .encode(&[ground_state()])
            .expect("ground state encodes");
        let text = report.document.render();
        assert!(text.ends_with("9                   END OF DATA for DWUCK4\n"));
        assert_eq!(report.document.line_count(), 16);
    }

    #[test]
    fn invalid_state_is_skipped_and_the_batch_continues() {
        let mut broken = ground_state();
        broken.j2_transfer = 6;
        let report = CardEncoder::standard()
            .encode(&[ground_state(), broken, unbound_state()])
            .expect("batch with one bad state still encodes");

        assert_eq!(report.encoded_count(), 2);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].state_index, 1);
        assert_eq!(report.skipped[0].reason.placeholder(), "INPUT.STATE_J2");
        assert_eq!(report.document.blocks[0].state_index, 0);
        assert_eq!(report.document.blocks[1].state_index, 2);
    }

    #[test]
    fn all_states_failing_is_an_empty_document_error() {
        let mut broken = ground_state();
        broken.q_value_mev = f64::NAN;
        let error = CardEncoder::standard()
            .encode(&[broken])
            .expect_err("all-invalid batch must fail");
        assert_eq!(error.category(), DwuckErrorCategory::EmptyDocumentError);
        assert_eq!(error.placeholder(), "CARD.EMPTY_DOCUMENT");
    }

    #[test]
    fn lossy_field_renderings_are_reported_never_silent() {
        let mut state = ground_state();
        state.q_value_mev = 123456.0;
        let report = CardEncoder::standard()
            .encode(&[state])
            .expect("oversized Q still encodes with a warning");
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(report.warnings[0].state_index, 0);
        assert!(report.warnings[0].detail.contains("exit identity card"));
    }

    #[test]
    fn unpadded_profile_leaves_card_tails_short() {
        let encoder = CardEncoder::new(
            ProtocolProfile::unpadded(),
            RunSettings::sulfur36_dp(),
            ParameterModel::standard(),
        );
        let report = encoder.encode(&[ground_state()]).expect("state encodes");
        let title = &report.document.blocks[0].lines[0];
        assert!(title.len() < 80);
        assert!(title.ends_with("bound ZR"));
    }

    #[test]
    fn blocks_follow_input_order() {
        let mut second = ground_state();
        second.excitation_kev = 1000.0;
        second.q_value_mev = 1.079;
        second.binding_energy_mev = -3.304;
        second.exit_energy_mev = 8.438;

        let report = CardEncoder::standard()
            .encode(&[ground_state(), second])
            .expect("batch encodes");
        assert!(report.document.blocks[0].lines[0].contains("0 keV"));
        assert!(report.document.blocks[1].lines[0].contains("1000 keV"));
    }
}
