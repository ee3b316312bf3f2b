#![allow(clippy::missing_docs_in_private_items)]
#![allow(clippy::arithmetic_side_effects)]
#![allow(clippy::ptr_arg)]
#![allow(clippy::indexing_slicing)]
#![allow(clippy::pedantic)]
#![allow(clippy::unwrap_used)]
#![allow(warnings)]

use bytedict::{ByteTable, ProbeStrategy};
use plotters::prelude::*;
use rand::Rng;
use std::time::Instant;

// Simulation constants; the flat table stays a power of two so both probe
// sequences run at full period
const TABLE_SIZE: usize = 65_536;
// Create load factors from 0.1 to 0.95 with 10 steps
const NUM_LOAD_FACTORS: usize = 10;

// Probe sequence strategies to compare
const STRATEGIES: [(&str, ProbeStrategy); 2] =
    [("Linear Probing", ProbeStrategy::Linear), ("Geometric Probing", ProbeStrategy::Geometric)];

// Places `key` into the flat table and reports how many probes it took
fn probes_to_place(table: &mut Vec<Option<u64>>, strategy: ProbeStrategy, key: u64) -> usize {
    for attempt in 0..table.len() as u64 {
        let index = strategy.slot(table.len(), key, attempt);
        if table[index].is_none() {
            table[index] = Some(key);
            return attempt as usize + 1; // Count the probe that landed
        }
    }

    table.len()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Generate load factors from 0.1 to 0.95
    let load_factors: Vec<f64> = (0..NUM_LOAD_FACTORS)
        .map(|i| 0.1 + (0.95 - 0.1) * (i as f64) / ((NUM_LOAD_FACTORS - 1) as f64))
        .collect();

    // Calculate number of keys for each load factor
    let num_keys: Vec<usize> =
        load_factors.iter().map(|&load| (TABLE_SIZE as f64 * load) as usize).collect();

    println!("Load factors: {:?}", load_factors);
    println!("Number of keys: {:?}", num_keys);

    // Results storage
    let mut average_probe_count: Vec<Vec<f64>> = vec![Vec::new(); STRATEGIES.len()];
    let mut worst_case_probes: Vec<Vec<usize>> = vec![Vec::new(); STRATEGIES.len()];

    // Generate random keys outside the loop to ensure fair comparison
    let mut rng = rand::rng();
    let max_keys_needed = *num_keys.iter().max().unwrap();
    let keys: Vec<u64> = (0..max_keys_needed).map(|_| rng.random()).collect();

    // Running experiments
    for &n_keys in &num_keys {
        println!("Testing with {} keys", n_keys);

        for (strategy_idx, &(name, strategy)) in STRATEGIES.iter().enumerate() {
            let mut table: Vec<Option<u64>> = vec![None; TABLE_SIZE];
            let mut probes_list: Vec<usize> = Vec::with_capacity(n_keys);

            for &key in keys.iter().take(n_keys) {
                probes_list.push(probes_to_place(&mut table, strategy, key));
            }

            // Calculate statistics
            let avg_probes = probes_list.iter().sum::<usize>() as f64 / probes_list.len() as f64;
            let worst_case = *probes_list.iter().max().unwrap_or(&0);

            // Store results
            average_probe_count[strategy_idx].push(avg_probes);
            worst_case_probes[strategy_idx].push(worst_case);

            println!("  {}: Avg probes = {:.2}, Worst = {}", name, avg_probes, worst_case);
        }
    }

    // Time the real table below its growth threshold for each strategy
    let timing_keys = TABLE_SIZE * 3 / 4;
    for &(name, strategy) in &STRATEGIES {
        let mut table = ByteTable::with_capacity_and_strategy(TABLE_SIZE, strategy);

        let started = Instant::now();
        for &key in keys.iter().take(timing_keys) {
            table.insert(key, Some(b"payload")).unwrap();
        }
        let insert_elapsed = started.elapsed();

        let started = Instant::now();
        let hits = keys.iter().take(timing_keys).filter(|&&key| table.contains_key(key)).count();
        let hit_elapsed = started.elapsed();

        // Flip bits so the lookups miss and walk their full probe chains
        let started = Instant::now();
        let misses = keys
            .iter()
            .take(timing_keys)
            .filter(|&&key| !table.contains_key(key ^ 0x5DEE_CE66_675F_608B))
            .count();
        let miss_elapsed = started.elapsed();

        println!(
            "{}: {} inserts in {:?}, {} hits in {:?}, {} misses in {:?} (len = {})",
            name,
            timing_keys,
            insert_elapsed,
            hits,
            hit_elapsed,
            misses,
            miss_elapsed,
            table.len()
        );
    }

    // Enhanced plot configuration
    let font_family = "sans-serif";

    // Enhanced colors with better contrast
    let colors = [
        RGBColor(220, 50, 50), // Bright red
        RGBColor(50, 90, 220), // Bright blue
    ];

    // High-quality rendering settings
    let line_width = 2;
    let marker_size = 4;
    let text_size = 16;
    let title_size = 35;

    // Plot 1: Average Probe Count - Higher resolution
    let root = BitMapBackend::new("average_probe_count.png", (1200, 800)).into_drawing_area();
    root.fill(&WHITE)?;

    let max_avg = average_probe_count
        .iter()
        .flat_map(|v| v.iter())
        .fold(0.0, |max, &x| if x > max { x } else { max }) *
        1.1; // Add 10% margin

    let mut chart = ChartBuilder::on(&root)
        .caption("Comparison of Probe Sequence Efficiency", (font_family, title_size))
        .margin(15)
        .x_label_area_size(60)
        .y_label_area_size(60)
        .right_y_label_area_size(10)
        .build_cartesian_2d(0..(num_keys.len() - 1), 0.0..max_avg)?;

    // Create custom x-axis labels
    let x_labels: Vec<String> = num_keys.iter().map(|&n| n.to_string()).collect();

    chart
        .configure_mesh()
        .x_labels(num_keys.len() - 1)
        .x_label_formatter(&|x| {
            if *x < x_labels.len() { x_labels[*x].clone() } else { "".to_string() }
        })
        .x_desc("Number of Keys Inserted")
        .y_desc("Average Probes per Insert")
        .axis_desc_style((font_family, text_size))
        .draw()?;

    // Add a vertical line at the table's growth threshold (80% load)
    let threshold_idx = num_keys.len() * 8 / 10;
    if threshold_idx < num_keys.len() - 1 {
        // Create a thin dashed line with proper styling
        let reference_style = ShapeStyle::from(&BLACK.mix(0.3)).stroke_width(1);
        chart
            .draw_series(LineSeries::new(
                vec![(threshold_idx, 0.0), (threshold_idx, max_avg)],
                reference_style,
            ))?
            .label("80% Growth Threshold")
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], reference_style));
    }

    // Draw lines for each strategy
    for (strategy_idx, &(name, _)) in STRATEGIES.iter().enumerate() {
        let color = &colors[strategy_idx % colors.len()];
        // Create style with proper stroke width
        let line_style = ShapeStyle::from(color).stroke_width(line_width);

        // Draw the line with increased thickness
        chart
            .draw_series(LineSeries::new(
                (0..num_keys.len() - 1).map(|i| (i, average_probe_count[strategy_idx][i])),
                line_style,
            ))?
            .label(name)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], line_style));

        // Add larger point markers
        chart.draw_series(
            (0..num_keys.len() - 1)
                .step_by(1) // Add marker at every point for better visibility
                .map(|i| {
                    Circle::new(
                        (i, average_probe_count[strategy_idx][i]),
                        marker_size,
                        color.filled(),
                    )
                }),
        )?;
    }

    // Add annotation for performance degradation
    if num_keys.len() > 6 {
        let high_load_idx = num_keys.len() - 3;
        let max_strategy_idx = (0..STRATEGIES.len())
            .max_by(|&a, &b| {
                average_probe_count[a][high_load_idx]
                    .partial_cmp(&average_probe_count[b][high_load_idx])
                    .unwrap()
            })
            .unwrap();

        chart.draw_series(std::iter::once(Text::new(
            "Probe chains stretch past the growth threshold",
            (high_load_idx, average_probe_count[max_strategy_idx][high_load_idx] * 0.9),
            (font_family, text_size),
        )))?;
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .position(SeriesLabelPosition::UpperLeft)
        .draw()?;

    // Plot 2: Worst-Case Probing - Higher resolution
    let root = BitMapBackend::new("worst_case_probe_count.png", (1200, 800)).into_drawing_area();
    root.fill(&WHITE)?;

    let max_worst = worst_case_probes
        .iter()
        .flat_map(|v| v.iter())
        .fold(0, |max, &x| if x > max { x } else { max }) as f64 *
        1.1; // Add 10% margin

    let mut chart = ChartBuilder::on(&root)
        .caption("Comparison of Worst-Case Probing", (font_family, title_size))
        .margin(15)
        .x_label_area_size(60)
        .y_label_area_size(60)
        .right_y_label_area_size(10)
        .build_cartesian_2d(0..(num_keys.len() - 1), 0.0..max_worst)?;

    chart
        .configure_mesh()
        .x_labels(num_keys.len() - 1)
        .x_label_formatter(&|x| {
            if *x < x_labels.len() { x_labels[*x].clone() } else { "".to_string() }
        })
        .x_desc("Number of Keys Inserted")
        .y_desc("Worst-Case Probe Complexity")
        .axis_desc_style((font_family, text_size))
        .draw()?;

    // Draw lines for each strategy
    for (strategy_idx, &(name, _)) in STRATEGIES.iter().enumerate() {
        let color = &colors[strategy_idx % colors.len()];
        let line_style = ShapeStyle::from(color).stroke_width(line_width);

        // Draw the line with increased thickness
        chart
            .draw_series(LineSeries::new(
                (0..num_keys.len() - 1).map(|i| (i, worst_case_probes[strategy_idx][i] as f64)),
                line_style,
            ))?
            .label(name)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], line_style));

        // Add larger point markers
        chart.draw_series(
            (0..num_keys.len() - 1)
                .step_by(1) // Add marker at every point for better visibility
                .map(|i| {
                    Circle::new(
                        (i, worst_case_probes[strategy_idx][i] as f64),
                        marker_size,
                        color.filled(),
                    )
                }),
        )?;
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .position(SeriesLabelPosition::UpperLeft)
        .draw()?;

    println!(
        "Generated high-quality plot images: average_probe_count.png, worst_case_probe_count.png"
    );

    Ok(())
}
