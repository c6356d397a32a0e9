#![allow(clippy::missing_docs_in_private_items)]
#![allow(clippy::arithmetic_side_effects)]
#![allow(clippy::indexing_slicing)]
#![allow(clippy::pedantic)]
#![allow(warnings)]

use plotters::prelude::*;
use probemap::fnv1a;
use rand::Rng;

// Simulation of linear probing insert cost at increasing load factors,
// next to Knuth's classic prediction for unsuccessful search:
// (1 + 1 / (1 - a)^2) / 2.
const TABLE_SIZE: usize = 100_000;
const NUM_LOAD_FACTORS: usize = 10;
const MAX_PROBES: usize = 1_000; // Prevent pathological scans

fn slot_of(key: &str) -> usize {
    (fnv1a(key) % TABLE_SIZE as u64) as usize
}

// Insert a key by linear probing; returns the number of probes used.
fn linear_probing(table: &mut Vec<Option<String>>, key: String) -> usize {
    let mut index = slot_of(&key);
    let mut probes = 1; // Start with first probe attempt

    while table[index].is_some() && probes < MAX_PROBES {
        index = (index + 1) % TABLE_SIZE;
        probes += 1;
    }

    if table[index].is_none() {
        table[index] = Some(key);
    }

    probes
}

fn knuth_prediction(load: f64) -> f64 {
    (1.0 + 1.0 / ((1.0 - load) * (1.0 - load))) / 2.0
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Generate load factors from 0.05 to 0.95
    let load_factors: Vec<f64> = (0..NUM_LOAD_FACTORS)
        .map(|i| 0.05 + (0.95 - 0.05) * (i as f64) / ((NUM_LOAD_FACTORS - 1) as f64))
        .collect();

    // Calculate number of keys for each load factor
    let num_keys: Vec<usize> =
        load_factors.iter().map(|&load| (TABLE_SIZE as f64 * load) as usize).collect();

    println!("Load factors: {:?}", load_factors);
    println!("Number of keys: {:?}", num_keys);

    // Generate random keys outside the loop so every run inserts the same set
    let mut rng = rand::rng();
    let max_keys_needed = *num_keys.iter().max().unwrap();
    let keys: Vec<String> =
        (0..max_keys_needed).map(|_| format!("key-{}", rng.random_range(1..u64::MAX))).collect();

    // Results storage
    let mut average_probes: Vec<f64> = Vec::new();
    let mut worst_case_probes: Vec<usize> = Vec::new();

    for &n_keys in &num_keys {
        println!("Inserting {} keys", n_keys);

        let mut table: Vec<Option<String>> = vec![None; TABLE_SIZE];
        let mut probes_list: Vec<usize> = Vec::with_capacity(n_keys);

        for key in keys.iter().take(n_keys) {
            probes_list.push(linear_probing(&mut table, key.clone()));
        }

        let avg = probes_list.iter().sum::<usize>() as f64 / probes_list.len() as f64;
        let worst = *probes_list.iter().max().unwrap_or(&0);

        average_probes.push(avg);
        worst_case_probes.push(worst);

        println!("  Linear Probing: Avg probes = {:.2}, Worst = {}", avg, worst);
    }

    let predicted: Vec<f64> = load_factors.iter().map(|&load| knuth_prediction(load)).collect();

    // Plot configuration
    let font_family = "sans-serif";
    let colors = [
        RGBColor(220, 50, 50), // Bright red: measured
        RGBColor(50, 90, 220), // Bright blue: predicted
    ];
    let line_width = 2;
    let marker_size = 4;
    let text_size = 16;
    let title_size = 35;

    let root = BitMapBackend::new("linear_probe_cost.png", (1200, 800)).into_drawing_area();
    root.fill(&WHITE)?;

    let max_avg = average_probes
        .iter()
        .chain(predicted.iter())
        .fold(0.0, |max, &x| if x > max { x } else { max }) *
        1.1; // Add 10% margin

    let mut chart = ChartBuilder::on(&root)
        .caption("Linear Probing Insert Cost vs Load Factor", (font_family, title_size))
        .margin(15)
        .x_label_area_size(60)
        .y_label_area_size(60)
        .right_y_label_area_size(10)
        .build_cartesian_2d(0..(load_factors.len() - 1), 0.0..max_avg)?;

    // Label the x axis with the load factors themselves
    let x_labels: Vec<String> = load_factors.iter().map(|&l| format!("{:.2}", l)).collect();

    chart
        .configure_mesh()
        .x_labels(load_factors.len() - 1)
        .x_label_formatter(&|x| {
            if *x < x_labels.len() { x_labels[*x].clone() } else { "".to_string() }
        })
        .x_desc("Load Factor")
        .y_desc("Average Insert Cost (probes)")
        .axis_desc_style((font_family, text_size))
        .draw()?;

    // Mark the 50% load factor the map maintains as its growth threshold
    let threshold_idx = load_factors.iter().position(|&l| l >= 0.5).unwrap_or(0);
    let reference_style = ShapeStyle::from(&BLACK.mix(0.3)).stroke_width(1);
    chart
        .draw_series(LineSeries::new(
            vec![(threshold_idx, 0.0), (threshold_idx, max_avg)],
            reference_style,
        ))?
        .label("50% Load Factor (growth threshold)")
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], reference_style));

    let series: [(&str, &Vec<f64>); 2] =
        [("Measured (FNV-1a keys)", &average_probes), ("Knuth prediction", &predicted)];

    for (series_idx, &(name, values)) in series.iter().enumerate() {
        let color = &colors[series_idx % colors.len()];
        let line_style = ShapeStyle::from(color).stroke_width(line_width);

        chart
            .draw_series(LineSeries::new(
                (0..load_factors.len() - 1).map(|i| (i, values[i])),
                line_style,
            ))?
            .label(name)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], line_style));

        chart.draw_series(
            (0..load_factors.len() - 1)
                .map(|i| Circle::new((i, values[i]), marker_size, color.filled())),
        )?;
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .position(SeriesLabelPosition::UpperLeft)
        .draw()?;

    println!("Generated plot image: linear_probe_cost.png");

    Ok(())
}
