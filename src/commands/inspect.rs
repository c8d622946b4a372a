//! # inspect 命令实现
//!
//! 解析并校验输入文件，打印体系概要，不做网格计算。
//!
//! ## 依赖关系
//! - 使用 `cli/inspect.rs` 定义的参数
//! - 使用 `parsers/`, `models/`, `landscape/constants.rs`
//! - 使用 `utils/output.rs`

use crate::cli::inspect::InspectArgs;
use crate::error::Result;
use crate::landscape::constants::AMU_TO_GRAM;
use crate::models::AdsorptionSystem;
use crate::parsers;
use crate::utils::output;

use tabled::{Table, Tabled};

#[derive(Debug, Tabled)]
struct SpeciesRow {
    #[tabled(rename = "Species")]
    label: String,
    #[tabled(rename = "ε (K)")]
    epsilon: String,
    #[tabled(rename = "σ (Å)")]
    sigma: String,
    #[tabled(rename = "q (e)")]
    charge: String,
    #[tabled(rename = "m (amu)")]
    mass: String,
    #[tabled(rename = "Count")]
    count: usize,
}

/// 执行 inspect 命令
pub fn execute(args: InspectArgs) -> Result<()> {
    let system = parsers::load_system(&args.input)?;

    output::print_header(&format!(
        "System '{}' ({} species)",
        system.name,
        system.species.len()
    ));

    println!("{}", Table::new(species_rows(&system)));
    println!();

    let l = &system.lattice;
    output::print_info(&format!(
        "Lattice: a = {:.4} Å, b = {:.4} Å, c = {:.4} Å",
        l.a, l.b, l.c
    ));
    output::print_info(&format!(
        "Angles: α = {:.3}°, β = {:.3}°, γ = {:.3}°",
        l.alpha, l.beta, l.gamma
    ));
    output::print_info(&format!("Cell volume: {:.3} Å³", l.volume()));

    let mass_amu = system.total_mass_amu()?;
    output::print_info(&format!(
        "Cell mass: {:.4} amu ({:.6e} g)",
        mass_amu,
        mass_amu * AMU_TO_GRAM
    ));
    output::print_info(&format!(
        "Framework: {} ({} atoms)",
        system.formula(),
        system.atoms.len()
    ));
    output::print_info(&format!("Probe: {}", system.probe));

    output::print_success("Input is valid");
    Ok(())
}

/// 种类表，附骨架中的原子数
fn species_rows(system: &AdsorptionSystem) -> Vec<SpeciesRow> {
    let composition = system.composition();

    system
        .species
        .iter()
        .map(|(label, s)| SpeciesRow {
            label: if label == system.probe {
                format!("{} (probe)", label)
            } else {
                label.to_string()
            },
            epsilon: format!("{:.3}", s.epsilon),
            sigma: format!("{:.4}", s.sigma),
            charge: format!("{:+.4}", s.charge),
            mass: format!("{:.4}", s.mass),
            count: composition.get(label).copied().unwrap_or(0),
        })
        .collect()
}
