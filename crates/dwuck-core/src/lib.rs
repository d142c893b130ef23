pub mod cards;
pub mod domain;
pub mod potential;
pub mod scanner;
pub mod serialization;
pub mod series;
pub mod stats;

pub use cards::{
    CardBlock, CardDocument, CardEncoder, EncodeReport, FieldWarning, ProtocolProfile,
    RunSettings, SkippedState,
};
pub use domain::{BoundClass, CodecResult, DwuckError, DwuckErrorCategory, StateInput};
pub use potential::{DerivedParameters, DerivedPotential, ParameterModel};
pub use scanner::{MalformedSeriesWarning, ScanReport, ScannerConfig, SeriesScanner};
pub use series::{ResultSeries, SeriesCollection};
