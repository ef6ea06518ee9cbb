/// Properties of the cumulative statistics across a spread of inputs.
use grade_recovery::{columns, Grouping, HeterogeneityError, Resource};

fn samples() -> Vec<(Vec<f64>, Vec<f64>)> {
    vec![
        (vec![10.0], vec![5.0]),
        (vec![1.0, 2.0, 3.0], vec![10.0, 5.0, 1.0]),
        (vec![3.0, 1.0, 2.0], vec![1.0, 10.0, 5.0]),
        (vec![5.5, 0.0, 2.25, 7.0, 1.0], vec![0.3, 4.1, 1.2, 0.3, 2.8]),
        (
            vec![120.0, 80.0, 45.0, 30.0, 15.0, 10.0],
            vec![0.2, 0.45, 0.9, 1.6, 3.1, 6.4],
        ),
    ]
}

fn last(resource: &Resource, column: &str) -> f64 {
    *resource.column(column).unwrap().last().unwrap()
}

#[test]
fn cumulative_fractions_end_at_one() {
    for (weights, grades) in samples() {
        let resource = Resource::new("r", &weights, &grades).unwrap();
        assert!((last(&resource, columns::CUMULATIVE_WEIGHT_FRACTION) - 1.0).abs() < 1e-9);
        assert!((last(&resource, columns::CUMULATIVE_RECOVERY) - 1.0).abs() < 1e-9);
    }
}

#[test]
fn table_is_sorted_by_descending_grade() {
    for (weights, grades) in samples() {
        let resource = Resource::new("r", &weights, &grades).unwrap();
        let sorted = resource.column(columns::GRADE).unwrap();
        assert!(sorted.windows(2).all(|w| w[0] >= w[1]));
    }
}

#[test]
fn final_cumulative_grade_is_weighted_mean() {
    for (weights, grades) in samples() {
        let resource = Resource::new("r", &weights, &grades).unwrap();
        let metal: f64 = weights.iter().zip(&grades).map(|(w, g)| w * g).sum();
        let mass: f64 = weights.iter().sum();
        assert!((last(&resource, columns::CUMULATIVE_GRADE) - metal / mass).abs() < 1e-9);
        assert!((resource.overall_grade() - metal / mass).abs() < 1e-9);
    }
}

#[test]
fn heterogeneity_is_non_negative() {
    for (weights, grades) in samples() {
        let resource = Resource::new("r", &weights, &grades).unwrap();
        assert!(resource.heterogeneity() >= 0.0);
    }
}

#[test]
fn worked_example() {
    let resource = Resource::new("Cu", &[1.0, 2.0, 3.0], &[10.0, 5.0, 1.0]).unwrap();
    assert_eq!(
        resource.column(columns::CUMULATIVE_WEIGHT).unwrap(),
        vec![1.0, 3.0, 6.0]
    );
    assert_eq!(resource.total_weight(), 6.0);
    assert_eq!(
        resource.column(columns::YIELD).unwrap(),
        vec![10.0, 10.0, 3.0]
    );
    assert_eq!(resource.total_yield(), 23.0);
    assert!((last(&resource, columns::CUMULATIVE_GRADE) - 23.0 / 6.0).abs() < 1e-9);
}

#[test]
fn invalid_input_is_rejected() {
    assert!(matches!(
        Resource::new("r", &[1.0, 2.0], &[1.0, 2.0, 3.0]),
        Err(HeterogeneityError::LengthMismatch { .. })
    ));
    assert!(matches!(
        Resource::new("r", &[0.0, 0.0, 0.0], &[1.0, 2.0, 3.0]),
        Err(HeterogeneityError::DegenerateInput(_))
    ));
    assert!(matches!(
        Resource::new("r", &[1e308, 1e308], &[2.0, 1.0]),
        Err(HeterogeneityError::DegenerateInput(_))
    ));
    assert!(matches!(
        Resource::new("r", &[], &[]),
        Err(HeterogeneityError::DegenerateInput(_))
    ));
}

#[test]
fn grouping_renders_every_resource_to_svg() {
    let mut grouping = Grouping::new("bench 1420");
    for (i, (weights, grades)) in samples().into_iter().enumerate() {
        grouping
            .add_resource(format!("r{}", i), &weights, &grades)
            .unwrap();
    }

    let figure = grouping.render_all_curves().unwrap();
    assert_eq!(figure.len(), 5);
    assert!(figure.panels().iter().all(|p| p.annotations().len() == 2));

    let svg = figure.to_svg_string().unwrap();
    assert!(svg.contains("<svg"));
}
