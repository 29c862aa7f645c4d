use std::io::{self, Write};

use jobhunter_client::config::init_config;
use jobhunter_client::dto::auth_dto::{LoginPayload, RegisterPayload};
use jobhunter_client::dto::resume_dto::SaveResumePayload;
use jobhunter_client::dto::vacancy_dto::{CreateVacancyPayload, UpdateVacancyPayload};
use jobhunter_client::error::Result;
use jobhunter_client::models::application::ApplicationStatus;
use jobhunter_client::models::resume::Resume;
use jobhunter_client::models::user::Role;
use jobhunter_client::services::app::{App, ViewModel};
use jobhunter_client::services::nav_service::View;
use jobhunter_client::utils::filter::VacancyFilter;

/// Line-based shell over the client core. Each command is one user action;
/// the active view is re-rendered after every one.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    init_config()?;

    let mut app = jobhunter_client::build_app()?;
    app.startup().await;

    println!("JobHunter. Type 'commands' for the command list, 'quit' to exit.");
    let mut filter = VacancyFilter::default();
    render(&app, &filter);

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;
        let mut line = String::new();
        if stdin.read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim().to_string();
        if line.is_empty() {
            continue;
        }
        if line == "quit" || line == "exit" {
            break;
        }
        match run_command(&mut app, &mut filter, &line).await {
            Ok(true) => render(&app, &filter),
            Ok(false) => {}
            Err(e) => println!("error: {}", e),
        }
    }
    Ok(())
}

/// Returns whether the active view should be re-rendered.
async fn run_command(app: &mut App, filter: &mut VacancyFilter, line: &str) -> Result<bool> {
    let (command, rest) = match line.split_once(' ') {
        Some((c, r)) => (c, r.trim()),
        None => (line, ""),
    };

    match command {
        "commands" => {
            print_usage();
            Ok(false)
        }
        "home" => {
            app.nav.navigate(View::Home, None);
            Ok(true)
        }
        "refresh" => {
            app.vacancies.refresh().await;
            Ok(true)
        }
        "filter" => {
            if rest == "clear" {
                *filter = VacancyFilter::default();
            } else {
                for pair in rest.split_whitespace() {
                    match pair.split_once('=') {
                        Some(("term", v)) => filter.term = v.to_string(),
                        Some(("keyword", v)) => filter.keyword = v.to_string(),
                        Some(("min", v)) => filter.min_salary = v.parse().unwrap_or(0),
                        _ => println!("unknown filter setting: {}", pair),
                    }
                }
            }
            app.nav.navigate(View::Home, None);
            Ok(true)
        }
        "login" => {
            let Some((email, password)) = split_pair(rest, "usage: login <email> <password>")
            else {
                return Ok(false);
            };
            app.login(LoginPayload {
                email: email.to_string(),
                password: password.to_string(),
            })
            .await?;
            println!("Welcome back.");
            Ok(true)
        }
        "register" => {
            // register <email> <password> <seeker|employer> <name...>
            let mut parts = rest.splitn(4, ' ');
            let (email, password, role, name) = match (
                parts.next(),
                parts.next(),
                parts.next(),
                parts.next(),
            ) {
                (Some(e), Some(p), Some(r), Some(n)) => (e, p, r, n),
                _ => {
                    println!("usage: register <email> <password> <seeker|employer> <name>");
                    return Ok(false);
                }
            };
            let role = match role {
                "seeker" => Role::Seeker,
                "employer" => Role::Employer,
                other => {
                    println!("unknown role: {}", other);
                    return Ok(false);
                }
            };
            app.register(RegisterPayload {
                email: email.to_string(),
                password: password.to_string(),
                name: name.to_string(),
                role,
                avatar: None,
            })
            .await?;
            println!("Registered. Sign in to continue.");
            Ok(true)
        }
        "logout" => {
            app.logout();
            Ok(true)
        }
        "open" => {
            let Some(id) = parse_id(rest, "usage: open <vacancy-id>") else {
                return Ok(false);
            };
            app.open_vacancy(id);
            let vacancy = app.vacancies.get(id).await?;
            println!("#{} {}", vacancy.id, vacancy.title);
            println!("  salary: {}", vacancy.salary);
            if let Some(employer) = &vacancy.employer_name {
                println!("  company: {}", employer);
            }
            println!("  {}", vacancy.description);
            Ok(false)
        }
        "mine" => {
            app.nav.navigate(View::MyVacancies, None);
            Ok(true)
        }
        "post" => {
            let Some((title, salary, description)) =
                split_triple(rest, "usage: post <title> | <salary> | <description>")
            else {
                return Ok(false);
            };
            let Some(employer_id) = app.session().map(|u| u.id) else {
                println!("Sign in as an employer first.");
                return Ok(false);
            };
            app.create_vacancy(CreateVacancyPayload {
                employer_id,
                title,
                salary,
                description,
                image: None,
            })
            .await?;
            println!("Vacancy published.");
            Ok(true)
        }
        "edit" => {
            let (id_part, fields) = match rest.split_once(' ') {
                Some(split) => split,
                None => {
                    println!("usage: edit <id> <title> | <salary> | <description>");
                    return Ok(false);
                }
            };
            let Some(id) = parse_id(id_part, "usage: edit <id> <title> | <salary> | <description>")
            else {
                return Ok(false);
            };
            let Some((title, salary, description)) =
                split_triple(fields, "usage: edit <id> <title> | <salary> | <description>")
            else {
                return Ok(false);
            };
            app.edit_vacancy(id);
            app.update_vacancy(UpdateVacancyPayload {
                id,
                title,
                salary,
                description,
                image: None,
            })
            .await?;
            println!("Vacancy updated.");
            Ok(true)
        }
        "delete" => {
            let Some(id) = parse_id(rest, "usage: delete <vacancy-id>") else {
                return Ok(false);
            };
            print!("Delete vacancy {}? [y/N] ", id);
            io::stdout().flush()?;
            let mut answer = String::new();
            io::stdin().read_line(&mut answer)?;
            let confirmed = answer.trim().eq_ignore_ascii_case("y");
            app.delete_vacancy(id, confirmed).await?;
            if confirmed {
                println!("Vacancy deleted.");
            }
            Ok(true)
        }
        "apply" => {
            let Some(id) = parse_id(rest, "usage: apply <vacancy-id>") else {
                return Ok(false);
            };
            app.apply_to_vacancy(id).await?;
            println!("Application sent.");
            Ok(false)
        }
        "apps" => {
            app.load_applications().await?;
            let view = match app.session().map(|u| u.role) {
                Some(Role::Employer) => View::Applications,
                _ => View::SeekerApplications,
            };
            app.nav.navigate(view, None);
            Ok(true)
        }
        "accept" | "reject" => {
            let Some(id) = parse_id(rest, "usage: accept|reject <application-id>") else {
                return Ok(false);
            };
            let target = if command == "accept" {
                ApplicationStatus::Accepted
            } else {
                ApplicationStatus::Rejected
            };
            app.decide_application(id, target).await?;
            println!("Application {}.", target);
            Ok(true)
        }
        "resume" => {
            if rest.is_empty() {
                app.nav.navigate(View::Resume, None);
                match app.my_resume().await? {
                    Some(resume) => print_resume(&resume),
                    None => println!("No resume yet. Use 'resume <key>=<value> ...' to create one."),
                }
                Ok(false)
            } else {
                let mut payload = resume_payload(app.my_resume().await?, app.session());
                for pair in rest.split_whitespace() {
                    if let Some((key, value)) = pair.split_once('=') {
                        if !set_resume_field(&mut payload, key, value) {
                            println!("unknown resume field: {}", key);
                        }
                    }
                }
                app.save_resume(payload).await?;
                println!("Resume saved.");
                Ok(false)
            }
        }
        "articles" => {
            app.nav.navigate(View::Help, None);
            for article in app.help_articles().await? {
                println!("#{} {}", article.id, article.title);
                println!("  {}", article.content);
            }
            Ok(false)
        }
        other => {
            println!("unknown command: {} (try 'commands')", other);
            Ok(false)
        }
    }
}

fn render(app: &App, filter: &VacancyFilter) {
    let Some(model) = app.render() else {
        println!("(nothing to show here)");
        return;
    };
    match model {
        ViewModel::Home {
            vacancies,
            connected,
            loading,
        } => {
            if loading {
                println!("Loading vacancies...");
                return;
            }
            if !connected {
                println!("!! No connection to the server.");
            }
            let shown = filter.apply(&vacancies);
            println!("Vacancies ({} of {}):", shown.len(), vacancies.len());
            for v in &shown {
                println!("  #{} {} — {}", v.id, v.title, v.salary);
            }
        }
        ViewModel::Login => println!("Sign in with: login <email> <password>"),
        ViewModel::Register => {
            println!("Create an account with: register <email> <password> <role> <name>")
        }
        ViewModel::MyVacancies { vacancies } => {
            println!("My vacancies ({}):", vacancies.len());
            for v in &vacancies {
                println!("  #{} {} — {}", v.id, v.title, v.salary);
            }
        }
        ViewModel::VacancyDetails { vacancy_id } => {
            println!("Vacancy #{} (use 'open {}' to fetch details)", vacancy_id, vacancy_id)
        }
        ViewModel::EditVacancy { vacancy_id } => println!("Editing vacancy #{}", vacancy_id),
        ViewModel::CreateVacancy => {
            println!("Publish with: post <title> | <salary> | <description>")
        }
        ViewModel::Applications { applications } => {
            println!("Applications to your vacancies ({}):", applications.len());
            for a in &applications {
                println!(
                    "  #{} [{}] {} — {}",
                    a.id,
                    a.status,
                    a.vacancy_title.as_deref().unwrap_or("?"),
                    a.seeker_name.as_deref().unwrap_or("?")
                );
            }
        }
        ViewModel::Resume { user_id } => println!("Resume of user #{}", user_id),
        ViewModel::SeekerApplications { applications } => {
            println!("My applications ({}):", applications.len());
            for a in &applications {
                println!(
                    "  #{} [{}] {} — {}",
                    a.id,
                    a.status,
                    a.vacancy_title.as_deref().unwrap_or("?"),
                    a.employer_name.as_deref().unwrap_or("?")
                );
            }
        }
        ViewModel::Help => println!("Use 'articles' to fetch the help articles."),
    }
}

fn print_usage() {
    println!("commands:");
    println!("  home | refresh | filter [term=..] [keyword=..] [min=..] | filter clear");
    println!("  login <email> <password> | register <email> <password> <role> <name> | logout");
    println!("  open <id> | mine | post <title> | <salary> | <description>");
    println!("  edit <id> <title> | <salary> | <description> | delete <id>");
    println!("  apply <id> | apps | accept <id> | reject <id>");
    println!("  resume [<key>=<value> ...] | articles | quit");
}

fn print_resume(resume: &Resume) {
    let field = |label: &str, value: &Option<String>| {
        if let Some(v) = value {
            if !v.is_empty() {
                println!("  {}: {}", label, v);
            }
        }
    };
    println!("Resume:");
    field("surname", &resume.surname);
    field("first_name", &resume.first_name);
    field("patronymic", &resume.patronymic);
    field("gender", &resume.gender);
    field("city", &resume.city);
    field("phone", &resume.phone);
    field("birthday", &resume.birthday);
    field("citizenship", &resume.citizenship);
    field("work_permit", &resume.work_permit);
    field("profession", &resume.profession);
    field("education_level", &resume.education_level);
    field("education_institution", &resume.education_institution);
    field("education_faculty", &resume.education_faculty);
    field("education_specialization", &resume.education_specialization);
    field("education_year", &resume.education_year);
    field("skills", &resume.skills);
}

/// Starts from the saved resume (upsert semantics) so a partial edit does
/// not blank the other fields.
fn resume_payload(
    existing: Option<Resume>,
    session: Option<&jobhunter_client::models::user::User>,
) -> SaveResumePayload {
    let user_id = session.map(|u| u.id).unwrap_or_default();
    match existing {
        Some(r) => SaveResumePayload {
            user_id,
            surname: r.surname.unwrap_or_default(),
            first_name: r.first_name.unwrap_or_default(),
            patronymic: r.patronymic.unwrap_or_default(),
            gender: r.gender.unwrap_or_default(),
            city: r.city.unwrap_or_default(),
            phone: r.phone.unwrap_or_default(),
            birthday: r.birthday.unwrap_or_default(),
            citizenship: r.citizenship.unwrap_or_default(),
            work_permit: r.work_permit.unwrap_or_default(),
            profession: r.profession.unwrap_or_default(),
            education_level: r.education_level.unwrap_or_default(),
            education_institution: r.education_institution.unwrap_or_default(),
            education_faculty: r.education_faculty.unwrap_or_default(),
            education_specialization: r.education_specialization.unwrap_or_default(),
            education_year: r.education_year.unwrap_or_default(),
            skills: r.skills.unwrap_or_default(),
        },
        None => SaveResumePayload {
            user_id,
            ..Default::default()
        },
    }
}

fn set_resume_field(payload: &mut SaveResumePayload, key: &str, value: &str) -> bool {
    let slot = match key {
        "surname" => &mut payload.surname,
        "first_name" => &mut payload.first_name,
        "patronymic" => &mut payload.patronymic,
        "gender" => &mut payload.gender,
        "city" => &mut payload.city,
        "phone" => &mut payload.phone,
        "birthday" => &mut payload.birthday,
        "citizenship" => &mut payload.citizenship,
        "work_permit" => &mut payload.work_permit,
        "profession" => &mut payload.profession,
        "education_level" => &mut payload.education_level,
        "education_institution" => &mut payload.education_institution,
        "education_faculty" => &mut payload.education_faculty,
        "education_specialization" => &mut payload.education_specialization,
        "education_year" => &mut payload.education_year,
        "skills" => &mut payload.skills,
        _ => return false,
    };
    *slot = value.to_string();
    true
}

fn split_pair<'a>(rest: &'a str, usage: &str) -> Option<(&'a str, &'a str)> {
    match rest.split_once(' ') {
        Some((a, b)) if !b.trim().is_empty() => Some((a, b.trim())),
        _ => {
            println!("{}", usage);
            None
        }
    }
}

fn split_triple(rest: &str, usage: &str) -> Option<(String, String, String)> {
    let parts: Vec<&str> = rest.split('|').map(str::trim).collect();
    match parts.as_slice() {
        [title, salary, description] => Some((
            title.to_string(),
            salary.to_string(),
            description.to_string(),
        )),
        _ => {
            println!("{}", usage);
            None
        }
    }
}

fn parse_id(raw: &str, usage: &str) -> Option<i64> {
    match raw.trim().parse() {
        Ok(id) => Some(id),
        Err(_) => {
            println!("{}", usage);
            None
        }
    }
}
