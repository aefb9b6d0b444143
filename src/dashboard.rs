use crate::format::{label_text, percent_or_na, value_or_na};
use crate::models::{GroupIndices, IcnuIndices, PopulationRow, Resultats};
use crate::quality::{self, Rating};
use serde::Serialize;

pub const CHART_TITLE: &str = "Distribution de la population par âge et sexe";

/// A displayed value with its optional quality label.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct IndexCell {
    pub display: String,
    pub rating: Option<Rating>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct GroupView {
    pub homme: IndexCell,
    pub femme: IndexCell,
    pub ensemble: IndexCell,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct IcnuView {
    pub indice_a: String,
    pub indice_b: String,
    pub indice_c: String,
    pub total: IndexCell,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub whipple: GroupView,
    pub myers: GroupView,
    pub bachi: GroupView,
    pub icnu: IcnuView,
    pub chart: ChartConfig,
}

pub fn build_dashboard(resultats: &Resultats, rows: &[PopulationRow]) -> DashboardView {
    DashboardView {
        whipple: rated_group(&resultats.whipple, quality::whipple),
        myers: rated_group(&resultats.myers, quality::myers),
        bachi: bachi_group(&resultats.bachi),
        icnu: icnu_view(&resultats.icnu),
        chart: population_chart(rows),
    }
}

fn rated_cell(value: Option<f64>, rate: fn(f64) -> Rating) -> IndexCell {
    IndexCell {
        display: value_or_na(value),
        rating: value.map(rate),
    }
}

fn rated_group(group: &GroupIndices, rate: fn(f64) -> Rating) -> GroupView {
    GroupView {
        homme: rated_cell(group.homme, rate),
        femme: rated_cell(group.femme, rate),
        ensemble: rated_cell(group.ensemble, rate),
    }
}

fn bachi_group(group: &GroupIndices) -> GroupView {
    let cell = |value: Option<f64>| IndexCell {
        display: percent_or_na(value),
        rating: None,
    };
    GroupView {
        homme: cell(group.homme),
        femme: cell(group.femme),
        ensemble: cell(group.ensemble),
    }
}

fn icnu_view(icnu: &IcnuIndices) -> IcnuView {
    IcnuView {
        indice_a: value_or_na(icnu.indice_a),
        indice_b: value_or_na(icnu.indice_b),
        indice_c: value_or_na(icnu.indice_c),
        total: rated_cell(icnu.icnu, quality::icnu),
    }
}

// Chart.js configuration, serialized as-is into the page.

#[derive(Debug, Clone, Serialize)]
pub struct ChartConfig {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub data: ChartData,
    pub options: ChartOptions,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub label: &'static str,
    pub data: Vec<Option<f64>>,
    pub border_color: &'static str,
    pub background_color: &'static str,
    pub tension: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartOptions {
    pub responsive: bool,
    pub plugins: ChartPlugins,
    pub scales: ChartScales,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartPlugins {
    pub title: ChartTitle,
    pub legend: ChartLegend,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartTitle {
    pub display: bool,
    pub text: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartLegend {
    pub display: bool,
    pub position: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartScales {
    pub y: ChartAxis,
    pub x: ChartAxis,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartAxis {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub begin_at_zero: Option<bool>,
    pub title: ChartTitle,
}

pub fn population_chart(rows: &[PopulationRow]) -> ChartConfig {
    let labels = rows.iter().map(|row| label_text(&row.age)).collect();
    let hommes = rows.iter().map(|row| row.homme).collect();
    let femmes = rows.iter().map(|row| row.femme).collect();

    ChartConfig {
        kind: "line",
        data: ChartData {
            labels,
            datasets: vec![
                Dataset {
                    label: "Hommes",
                    data: hommes,
                    border_color: "rgb(54, 162, 235)",
                    background_color: "rgba(54, 162, 235, 0.1)",
                    tension: 0.1,
                },
                Dataset {
                    label: "Femmes",
                    data: femmes,
                    border_color: "rgb(255, 99, 132)",
                    background_color: "rgba(255, 99, 132, 0.1)",
                    tension: 0.1,
                },
            ],
        },
        options: ChartOptions {
            responsive: true,
            plugins: ChartPlugins {
                title: ChartTitle {
                    display: true,
                    text: CHART_TITLE,
                },
                legend: ChartLegend {
                    display: true,
                    position: "top",
                },
            },
            scales: ChartScales {
                y: ChartAxis {
                    begin_at_zero: Some(true),
                    title: ChartTitle {
                        display: true,
                        text: "Effectif",
                    },
                },
                x: ChartAxis {
                    begin_at_zero: None,
                    title: ChartTitle {
                        display: true,
                        text: "Âge",
                    },
                },
            },
        },
    }
}
