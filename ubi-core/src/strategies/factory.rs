use tracing::warn;

use crate::models::{TaxModelKind, TaxationModel};

use super::{
    BellCurveTaxStrategy, FlatTaxStrategy, ProgressiveTaxStrategy, StrategyConfig,
    TaxationStrategy,
};

/// Builds taxation strategies from stored model ids.
///
/// Every call constructs fresh instances; nothing is cached. Unknown ids
/// fall back to the flat tax model instead of failing.
///
/// ```
/// use ubi_core::{TaxationStrategy, TaxationStrategyFactory};
///
/// assert_eq!(TaxationStrategyFactory::get_strategy(2).name(), "Progressive Tax");
/// assert_eq!(TaxationStrategyFactory::get_strategy(99).name(), "Flat Tax");
/// ```
pub struct TaxationStrategyFactory;

impl TaxationStrategyFactory {
    /// Strategy for `model_id` with default parameters.
    pub fn get_strategy(model_id: i32) -> Box<dyn TaxationStrategy> {
        Self::for_kind(Self::resolve(model_id))
    }

    /// One strategy per model with default parameters, ordered by id.
    pub fn get_all_strategies() -> Vec<Box<dyn TaxationStrategy>> {
        TaxModelKind::all()
            .into_iter()
            .map(Self::for_kind)
            .collect()
    }

    /// Identity of every available model, ordered by id.
    pub fn models() -> Vec<TaxationModel> {
        TaxModelKind::all()
            .iter()
            .map(TaxModelKind::as_model)
            .collect()
    }

    /// Strategy for the configured model, built from the configured
    /// parameters. The parameters are used as given; call
    /// [`StrategyConfig::validate`] first to reject bad input.
    pub fn from_config(config: &StrategyConfig) -> Box<dyn TaxationStrategy> {
        match Self::resolve(config.model_id) {
            TaxModelKind::Flat => Box::new(FlatTaxStrategy::new(config.flat_tax_rate)),
            TaxModelKind::Progressive => {
                Box::new(ProgressiveTaxStrategy::new(config.brackets.clone()))
            }
            TaxModelKind::BellCurve => Box::new(BellCurveTaxStrategy::new(
                config.bell_curve.clone(),
                config.percentile_bands.clone(),
            )),
        }
    }

    fn for_kind(kind: TaxModelKind) -> Box<dyn TaxationStrategy> {
        match kind {
            TaxModelKind::Flat => Box::new(FlatTaxStrategy::default()),
            TaxModelKind::Progressive => Box::new(ProgressiveTaxStrategy::default()),
            TaxModelKind::BellCurve => Box::new(BellCurveTaxStrategy::default()),
        }
    }

    fn resolve(model_id: i32) -> TaxModelKind {
        TaxModelKind::from_id(model_id).unwrap_or_else(|| {
            warn!(model_id, "unknown taxation model; falling back to flat tax");
            TaxModelKind::Flat
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::models::Bracket;
    use crate::strategies::BellCurveParameters;

    #[test]
    fn get_strategy_maps_known_ids() {
        assert_eq!(TaxationStrategyFactory::get_strategy(1).kind(), TaxModelKind::Flat);
        assert_eq!(
            TaxationStrategyFactory::get_strategy(2).kind(),
            TaxModelKind::Progressive
        );
        assert_eq!(
            TaxationStrategyFactory::get_strategy(3).kind(),
            TaxModelKind::BellCurve
        );
    }

    #[test]
    fn get_strategy_falls_back_to_flat() {
        for model_id in [0, 4, -7, i32::MAX] {
            let strategy = TaxationStrategyFactory::get_strategy(model_id);

            assert_eq!(strategy.kind(), TaxModelKind::Flat);
            assert_eq!(strategy.model_id(), 1);
        }
    }

    #[test]
    fn get_strategy_uses_default_parameters() {
        let strategy = TaxationStrategyFactory::get_strategy(1);

        // Default flat rate is 30 %
        assert_eq!(strategy.calculate_tax(dec!(124), dec!(24)), dec!(30));
    }

    #[test]
    fn get_all_strategies_returns_each_model_in_order() {
        let names: Vec<&str> = TaxationStrategyFactory::get_all_strategies()
            .iter()
            .map(|strategy| strategy.name())
            .collect();

        assert_eq!(names, vec!["Flat Tax", "Progressive Tax", "Bell Curve"]);
    }

    #[test]
    fn models_lists_identities() {
        let models = TaxationStrategyFactory::models();

        assert_eq!(models.len(), 3);
        assert_eq!(models[1], TaxModelKind::Progressive.as_model());
    }

    #[test]
    fn every_strategy_is_zero_below_exemption() {
        let exemption = dec!(24);

        for strategy in TaxationStrategyFactory::get_all_strategies() {
            for income in [dec!(-100), dec!(0), dec!(12.5), dec!(24)] {
                assert_eq!(
                    strategy.calculate_tax(income, exemption),
                    Decimal::ZERO,
                    "{} at {income}",
                    strategy.name()
                );
            }
        }
    }

    // =========================================================================
    // from_config tests
    // =========================================================================

    #[test]
    fn from_config_honours_flat_rate() {
        let config = StrategyConfig {
            flat_tax_rate: dec!(10),
            ..StrategyConfig::default()
        };

        let strategy = TaxationStrategyFactory::from_config(&config);

        assert_eq!(strategy.calculate_tax(dec!(124), dec!(24)), dec!(10));
    }

    #[test]
    fn from_config_honours_brackets() {
        let config = StrategyConfig {
            model_id: 2,
            brackets: vec![
                Bracket::new(dec!(0), Some(dec!(100)), dec!(5)),
                Bracket::new(dec!(100), None, dec!(50)),
            ],
            ..StrategyConfig::default()
        };

        let strategy = TaxationStrategyFactory::from_config(&config);

        // 100 at 5 % + 20 at 50 %
        assert_eq!(strategy.calculate_tax(dec!(120), Decimal::ZERO), dec!(15));
    }

    #[test]
    fn from_config_honours_bell_curve_cap() {
        let config = StrategyConfig {
            model_id: 3,
            bell_curve: BellCurveParameters {
                max_tax_amount: dec!(5),
                ..BellCurveParameters::default()
            },
            ..StrategyConfig::default()
        };

        let strategy = TaxationStrategyFactory::from_config(&config);

        assert_eq!(strategy.calculate_tax(dec!(200), dec!(24)), dec!(5));
    }

    #[test]
    fn from_config_unknown_model_falls_back_to_flat() {
        let config = StrategyConfig {
            flat_tax_rate: dec!(20),
            ..StrategyConfig::for_model(12)
        };

        let strategy = TaxationStrategyFactory::from_config(&config);

        assert_eq!(strategy.kind(), TaxModelKind::Flat);
        assert_eq!(strategy.calculate_tax(dec!(34), dec!(24)), dec!(2));
    }
}
