use std::fmt::Display;
use std::fmt::Formatter;
use std::path::PathBuf;

use crate::chart::Chart;
use crate::chart::ChartStyle;
use crate::chart::BLUE;
use crate::chart::GREEN;
use crate::chart::RED;
use crate::export;
use crate::measurements;
use crate::measurements::Measurements;
use crate::model::curvefit::sum_of_squared_residuals;
use crate::model::lamp::lamp_model;
use crate::model::linspace_closed;
use crate::model::ohmic::ohmic_model;
use crate::model::FitError;
use crate::model::IVModel;
use crate::model::LampModel;
use crate::model::OhmicModel;
use crate::options::TrendOpt;
use crate::Result;

/// Samples of the smooth lamp trend curve.
pub const SMOOTH_TREND_POINTS: usize = 300;

const X_LABEL: &str = "Tensão (V) em Volts";
const Y_LABEL: &str = "Corrente (I) em Amperes";
const SCATTER_LABEL: &str = "Dados Experimentais";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Experiment {
    BenchLoad,
    IncandescentLamp,
}

#[derive(Clone, Debug, PartialEq)]
pub enum FittedModel {
    Ohmic(OhmicModel),
    Lamp(LampModel),
}

impl FittedModel {
    pub fn as_iv_model(&self) -> &dyn IVModel {
        match self {
            FittedModel::Ohmic(model) => model,
            FittedModel::Lamp(model) => model,
        }
    }
}

impl Display for FittedModel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        self.as_iv_model().fmt(f)
    }
}

impl Display for Experiment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Experiment::BenchLoad => f.write_str("bench load"),
            Experiment::IncandescentLamp => f.write_str("incandescent lamp"),
        }
    }
}

impl Experiment {
    pub fn measurements(&self) -> Measurements {
        match self {
            Experiment::BenchLoad => measurements::bench_load(),
            Experiment::IncandescentLamp => measurements::incandescent_lamp(),
        }
    }

    pub fn style(&self) -> ChartStyle {
        let (title, scatter_color, trend_label) = match self {
            Experiment::BenchLoad => (
                "Gráfico I x V - Carga de Bancada (Resistor Ôhmico)",
                GREEN,
                "Linha de Tendência (Regressão Linear)",
            ),
            Experiment::IncandescentLamp => (
                "Gráfico I x V - Lâmpada Incandescente (Não Ôhmico)",
                BLUE,
                "Curva de Tendência (Não Linear)",
            ),
        };
        ChartStyle {
            title: title.to_string(),
            x_label: X_LABEL.to_string(),
            y_label: Y_LABEL.to_string(),
            scatter_color,
            scatter_label: SCATTER_LABEL.to_string(),
            trend_color: RED,
            trend_label: trend_label.to_string(),
        }
    }

    pub fn default_output(&self) -> &'static str {
        match self {
            Experiment::BenchLoad => "grafico_IxV_resistencia_bancada_ajustado.png",
            Experiment::IncandescentLamp => "grafico_IxV_Lampada_Ajustado.png",
        }
    }

    /// Voltages the trend curve is drawn through.
    ///
    /// The straight line only needs the measured voltages; the lamp curve is
    /// sampled densely so it looks smooth.
    pub fn trend_grid(&self, measurements: &Measurements, model: &dyn IVModel) -> Vec<f64> {
        match self {
            Experiment::BenchLoad => measurements.voltage.clone(),
            Experiment::IncandescentLamp => {
                linspace_closed(model.min_v(), model.max_v(), SMOOTH_TREND_POINTS)
            }
        }
    }

    pub fn fit(&self) -> std::result::Result<FittedExperiment, FitError> {
        let measurements = self.measurements();
        let model = match self {
            Experiment::BenchLoad => FittedModel::Ohmic(ohmic_model(&measurements)?),
            Experiment::IncandescentLamp => FittedModel::Lamp(lamp_model(&measurements)?),
        };
        let grid = self.trend_grid(&measurements, model.as_iv_model());
        let trend = model.as_iv_model().trend(&grid);
        Ok(FittedExperiment {
            experiment: *self,
            measurements,
            model,
            trend,
        })
    }
}

#[derive(Clone, Debug)]
pub struct FittedExperiment {
    pub experiment: Experiment,
    pub measurements: Measurements,
    pub model: FittedModel,
    pub trend: Vec<(f64, f64)>,
}

impl FittedExperiment {
    /// Text printed on stdout; only the ohmic load has one.
    pub fn report(&self) -> String {
        match &self.model {
            FittedModel::Ohmic(model) => model.summary(),
            FittedModel::Lamp(_) => String::new(),
        }
    }

    pub fn sum_of_squared_residuals(&self) -> f64 {
        sum_of_squared_residuals(self.model.as_iv_model(), &self.measurements)
    }

    pub fn chart(&self) -> Chart {
        Chart::new(
            &self.measurements,
            self.trend.clone(),
            self.experiment.style(),
        )
    }
}

/// Fits, reports, saves the chart and then shows it, as the binaries do.
pub fn run(experiment: Experiment, opt: &TrendOpt) -> Result<()> {
    let fitted = experiment.fit()?;
    info!("Fitted the {} model:\n{}", experiment, fitted.model);
    debug!(
        "Sum of squared residuals: {:e}",
        fitted.sum_of_squared_residuals()
    );

    print!("{}", fitted.report());

    let output = opt
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(experiment.default_output()));
    let chart = fitted.chart();
    chart.save_png(&output)?;
    info!("Saved the chart to {}", output.display());

    if let Some(path) = &opt.export {
        export::save_as_csv(&fitted.measurements, fitted.model.as_iv_model(), path)?;
        info!("Exported the readings to {}", path.display());
    }

    if opt.no_show {
        return Ok(());
    }
    show(chart)
}

#[cfg(feature = "viewer")]
fn show(chart: Chart) -> Result<()> {
    crate::viewer::show(chart)
}

#[cfg(not(feature = "viewer"))]
fn show(_: Chart) -> Result<()> {
    warn!("Built without the viewer, the chart is only saved to a file");
    Ok(())
}
