use serde::{Deserialize, Serialize};

use crate::{Alternative, Criterion, DecisionMatrix, Topsis, WeightVector};

/// A complete decision problem: the criteria with their weights and orientation, and the raw
/// values of every alternative in criterion order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Problem {
    pub criteria: Vec<Criterion>,
    pub alternatives: Vec<Choice>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Choice {
    #[serde(default)]
    pub name: String,
    pub values: Vec<f64>,
}

impl Problem {
    /// Build an engine configured with the default accumulator, ready for `process`.
    pub fn into_engine(self) -> Topsis<f64, DecisionMatrix> {
        let mut topsis = Topsis::new();
        topsis.set_accumulator(DecisionMatrix::default());
        topsis.set_weights(WeightVector::new(self.criteria));
        for Choice { name, values } in self.alternatives {
            topsis.add_alternative(Alternative::named(name, values));
        }
        topsis
    }
}

#[cfg(test)]
mod test {
    use super::Problem;
    use crate::{test::assert_within, Error, Impact};

    const CARS: &str = r#"{
        "criteria": [
            { "name": "price", "weight": 0.4, "impact": "cost" },
            { "name": "comfort", "weight": 0.35, "impact": "benefit" },
            { "name": "mileage", "weight": 0.25, "impact": "benefit" }
        ],
        "alternatives": [
            { "name": "hatchback", "values": [12000, 5, 18] },
            { "name": "sedan", "values": [20000, 8, 14] },
            { "name": "wagon", "values": [16000, 7, 16] }
        ]
    }"#;

    #[test]
    fn parse_and_rank() {
        let problem: Problem = serde_json::from_str(CARS).unwrap();
        assert_eq!(problem.criteria[0].impact, Impact::Cost);
        let mut topsis = problem.into_engine();
        topsis.process().unwrap();

        let names: Vec<&str> = topsis.alternatives().iter().map(|a| a.name()).collect();
        assert_eq!(names, vec!["sedan", "wagon", "hatchback"]);
        let best = topsis.best_alternative().unwrap();
        assert_eq!(best.name(), "hatchback");
        assert_within(best.closeness().unwrap().as_f64(), 0.5704, 1e-4);
        for alternative in topsis.alternatives() {
            let c = alternative.closeness().unwrap().as_f64();
            let expected = alternative.loss_distance()
                / (alternative.profit_distance() + alternative.loss_distance());
            assert_within(c, expected, 1e-12);
        }
    }

    #[test]
    fn empty_problem() {
        let problem: Problem =
            serde_json::from_str(r#"{ "criteria": [], "alternatives": [] }"#).unwrap();
        assert_eq!(
            problem.into_engine().process(),
            Err(Error::EmptyAlternativeSet)
        );
    }
}
