use std::fs;

use anyhow::{Context, Result};

use hbond_census::io::{AltLocPolicy, ReadConfig};
use hbond_census::{PairingPolicy, SurveyConfig};

use crate::cli::{CriteriaOptions, SelectionOptions};

pub fn build_read_config(opts: &SelectionOptions) -> ReadConfig {
    ReadConfig {
        model: opts.model,
        chain: opts.chain,
        alt_locs: if opts.all_alt_locs {
            AltLocPolicy::All
        } else {
            AltLocPolicy::FirstOnly
        },
    }
}

/// Seeds from `--config` when given, then applies explicit flags on top.
pub fn build_survey_config(opts: &CriteriaOptions) -> Result<SurveyConfig> {
    match &opts.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("Failed to read survey config: {}", path.display()))?;
            layer_survey_config(Some(&text), opts)
                .with_context(|| format!("Invalid survey config: {}", path.display()))
        }
        None => layer_survey_config(None, opts)
            .context("Invalid acceptance criteria on the command line"),
    }
}

/// Ranges are checked once, after the flags have been applied.
fn layer_survey_config(toml: Option<&str>, opts: &CriteriaOptions) -> Result<SurveyConfig> {
    let mut config = match toml {
        Some(text) => SurveyConfig::parse_toml(text)?,
        None => SurveyConfig::default(),
    };
    apply_overrides(&mut config, opts);
    config.validate()?;
    Ok(config)
}

fn apply_overrides(config: &mut SurveyConfig, opts: &CriteriaOptions) {
    let t = &mut config.thresholds;
    let overrides = [
        (&mut t.donor_acceptor_max_distance, opts.donor_acceptor_max),
        (&mut t.hydrogen_acceptor_max_distance, opts.hydrogen_acceptor_max),
        (&mut t.dha_angle_min, opts.dha_min),
        (&mut t.dab_angle_min, opts.dab_min),
        (&mut t.hab_angle_min, opts.hab_min),
    ];
    for (slot, value) in overrides {
        if let Some(v) = value {
            *slot = v;
        }
    }

    if let Some(h) = opts.hydrogen {
        config.hydrogen = h.into();
    }
    if opts.exclusive {
        config.pairing = PairingPolicy::Exclusive;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::HydrogenChoice;
    use hbond_census::HydrogenSelection;

    fn no_flags() -> CriteriaOptions {
        CriteriaOptions {
            config: None,
            donor_acceptor_max: None,
            hydrogen_acceptor_max: None,
            dha_min: None,
            dab_min: None,
            hab_min: None,
            hydrogen: None,
            exclusive: false,
        }
    }

    #[test]
    fn no_flags_yield_defaults() {
        assert_eq!(build_survey_config(&no_flags()).unwrap(), SurveyConfig::default());
    }

    #[test]
    fn flags_override_file_values() {
        let mut config = SurveyConfig::from_toml_str(
            concat!(
                "pairing = \"exclusive\"\n",
                "[thresholds]\ndonor_acceptor_max_distance = 3.2\ndha_angle_min = 110.0",
            ),
        )
        .unwrap();
        let opts = CriteriaOptions {
            dha_min: Some(120.0),
            hydrogen: Some(HydrogenChoice::Nearest),
            ..no_flags()
        };
        apply_overrides(&mut config, &opts);

        assert_eq!(config.thresholds.donor_acceptor_max_distance, 3.2);
        assert_eq!(config.thresholds.dha_angle_min, 120.0);
        assert_eq!(config.hydrogen, HydrogenSelection::Nearest);
        assert_eq!(config.pairing, PairingPolicy::Exclusive);
    }

    #[test]
    fn flag_repairs_out_of_range_file_value() {
        let file = "[thresholds]\nhab_angle_min = 400.0\ndonor_acceptor_max_distance = 3.3";
        let opts = CriteriaOptions {
            hab_min: Some(100.0),
            ..no_flags()
        };
        let config = layer_survey_config(Some(file), &opts).unwrap();
        assert_eq!(config.thresholds.hab_angle_min, 100.0);
        assert_eq!(config.thresholds.donor_acceptor_max_distance, 3.3);

        assert!(layer_survey_config(Some(file), &no_flags()).is_err());
    }

    #[test]
    fn invalid_flag_is_rejected() {
        let opts = CriteriaOptions {
            hab_min: Some(400.0),
            ..no_flags()
        };
        assert!(build_survey_config(&opts).is_err());
    }

    #[test]
    fn missing_config_file_is_reported() {
        let opts = CriteriaOptions {
            config: Some("/nonexistent/hbcensus.toml".into()),
            ..no_flags()
        };
        let err = build_survey_config(&opts).unwrap_err();
        assert!(err.to_string().contains("hbcensus.toml"));
    }
}
