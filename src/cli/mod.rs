//! Interactive terminal front end for the posting form.

pub mod output;
pub mod prompts;

use std::env;

use dialoguer::theme::ColorfulTheme;

use crate::config::ConfigManager;
use crate::errors::{CliError, FormError};
use crate::form::{fields, Endpoint, FieldBinding, RangeFieldController, VacancyForm};
use crate::submission::{HttpTransport, SubmissionState, SubmissionTransport};
use crate::utils::build_info;

use prompts::{confirm_action, prompt_text, DialoguerConfirmation, TerminalNotifications};

const USAGE: &str = "\
Usage: vacancy_cli [--version | --help]

Fills in a job vacancy interactively and publishes it to the configured API.
Settings are read from $VACANCY_FORM_HOME/config.json (default ~/.vacancy_form).";

/// Free-text fields prompted before the range controls.
const TEXT_FIELDS: [(&str, &str); 15] = [
    (fields::NAME, "Nombre de la vacante"),
    (fields::SECTOR, "Sector"),
    (fields::MODALITY, "Modalidad"),
    (fields::LOCATION, "Ubicación"),
    (fields::NUMBER_OPENINGS, "Número de vacantes"),
    (fields::DESCRIPTION, "Descripción"),
    (fields::EXPERIENCE, "Experiencia"),
    (fields::GENDER, "Género"),
    (fields::MIN_AGE, "Edad mínima"),
    (fields::MAX_AGE, "Edad máxima"),
    (fields::REQUIRED_DEGREE, "Escolaridad requerida"),
    (fields::BENEFITS, "Prestaciones"),
    (fields::WORKING_DAYS, "Días laborales (separados por coma)"),
    (fields::WORK_SHIFT, "Jornada"),
    (fields::ADDITIONAL_INFORMATION, "Información adicional"),
];

/// Entry point used by `vacancy_cli`.
pub fn run_cli() -> Result<(), CliError> {
    let args: Vec<String> = env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        Some("--version") | Some("-V") => {
            println!("{}", build_info::current().summary());
            return Ok(());
        }
        Some("--help") | Some("-h") => {
            println!("{USAGE}");
            return Ok(());
        }
        Some(other) => return Err(CliError::Usage(other.to_string())),
        None => {}
    }

    let manager = ConfigManager::new()?;
    let config = manager.load()?;
    tracing::info!(path = %manager.path().display(), api = %config.api_base_url, "configuration loaded");

    let transport = HttpTransport::from_config(&config)?;
    let mut form = VacancyForm::new(&config)?;
    run_session(&mut form, &transport)
}

/// Prompts every field, then publishes until the vacancy is sent or the user
/// gives up.
pub fn run_session(form: &mut VacancyForm, transport: &dyn SubmissionTransport) -> Result<(), CliError> {
    let theme = ColorfulTheme::default();
    output::section("Nueva vacante");
    fill_text_fields(&theme, form)?;
    fill_ranges(&theme, form)?;

    let mut confirmation = DialoguerConfirmation::new();
    let mut notifications = TerminalNotifications;
    loop {
        match form.publish(&mut confirmation, &mut notifications, transport) {
            Ok(SubmissionState::Succeeded) => return Ok(()),
            Ok(state) => {
                tracing::debug!(state = state.label(), "publish did not complete");
            }
            Err(FormError::Blocked(message)) => output::warning(message),
            Err(err) => return Err(err.into()),
        }

        if !confirm_action(&theme, "¿Editar y volver a intentar?", true)? {
            output::info("La vacante no se publicó.");
            return Ok(());
        }
        fill_ranges(&theme, form)?;
    }
}

fn fill_text_fields(theme: &ColorfulTheme, form: &mut VacancyForm) -> Result<(), CliError> {
    for (name, label) in TEXT_FIELDS {
        let current = form.store().borrow().value(name).unwrap_or_default();
        let entered = prompt_text(theme, label, &current)?;
        form.set_field(name, entered.trim());
    }
    Ok(())
}

fn fill_ranges(theme: &ColorfulTheme, form: &mut VacancyForm) -> Result<(), CliError> {
    output::section("Salario");
    fill_range(theme, form.salary_mut(), ["Salario mínimo", "Salario máximo"])?;
    output::section("Horario");
    fill_range(theme, form.schedule_mut(), ["Hora de inicio (HH:MM)", "Hora de fin (HH:MM)"])
}

fn fill_range(
    theme: &ColorfulTheme,
    control: &mut RangeFieldController,
    labels: [&str; 2],
) -> Result<(), CliError> {
    for (endpoint, label) in [(Endpoint::Lower, labels[0]), (Endpoint::Upper, labels[1])] {
        let raw = prompt_text(theme, label, &control.value(endpoint))?;
        let typed = control.input(endpoint, &raw);
        control.blur(endpoint);
        let committed = control.value(endpoint);
        if committed != typed {
            output::info(format!("{label}: {committed}"));
        }
    }
    if let Some(message) = control.error() {
        output::warning(message);
    }
    Ok(())
}
