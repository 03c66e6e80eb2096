mod bracket;
mod income_segment;
mod model_data;
mod percentile_band;
mod tax_model;

pub use bracket::Bracket;
pub use income_segment::{IncomeSegment, RevenuePolicy};
pub use model_data::{
    IncomePercentileRecord, ModelParameters, TaxBracketRecord, TaxationModel, TaxationModelData,
};
pub use percentile_band::PercentileBand;
pub use tax_model::{TaxModelError, TaxModelKind};
