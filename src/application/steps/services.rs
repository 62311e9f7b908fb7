//! nginx, gunicorn, fail2ban and the iptables firewall

use crate::application::runner::StepContext;
use crate::application::session::Session;
use crate::config::services::{INTRUSION_PREVENTION, PROCESS_MANAGER, WEB_SERVER};
use crate::domain::value_objects::{join_remote_path, ShellCommand};
use crate::error::StagehandResult;

use super::{append_line, systemctl};

const GUNICORN_UNIT: &str = "gunicorn.service";
const FAIL2BAN_JAIL: &str = "jail.local";

fn remove(session: &Session, path: &str) -> StagehandResult<()> {
    session.run_privileged(&ShellCommand::new("rm").literal("-rf").arg(path), None)?;
    Ok(())
}

fn copy(session: &Session, from: &str, to: &str) -> StagehandResult<()> {
    session.run_privileged(&ShellCommand::new("cp").literal("-f").arg(from).arg(to), None)?;
    Ok(())
}

pub(super) fn deploy_web_server(session: &mut Session, context: &StepContext<'_>) -> StagehandResult<()> {
    let service = context.project.service(WEB_SERVER)?;
    let dir = &service.config_directory;
    let site = join_remote_path(
        dir,
        &format!("sites-available/{}", context.project.project_name),
    );

    remove(session, &site)?;
    remove(session, &join_remote_path(dir, "sites-enabled/default"))?;
    copy(session, &service.config_src, &site)?;
    // Already linked on re-deploys
    session.with_warnings_only(|session| {
        session.run_privileged(
            &ShellCommand::new("ln")
                .literal("-s")
                .arg(&site)
                .arg(join_remote_path(dir, "sites-enabled")),
            None,
        )
    })?;
    session.run_privileged(&ShellCommand::new("nginx").literal("-t"), None)?;
    systemctl(session, "restart", "nginx")
}

pub(super) fn deploy_intrusion_prevention(
    session: &mut Session,
    context: &StepContext<'_>,
) -> StagehandResult<()> {
    let service = context.project.service(INTRUSION_PREVENTION)?;

    session.run_privileged(&ShellCommand::new("ufw").arg("disable"), None)?;
    remove(session, &join_remote_path(&service.config_directory, FAIL2BAN_JAIL))?;
    copy(session, &service.config_src, &service.config_directory)?;
    systemctl(session, "restart", "fail2ban")
}

pub(super) fn deploy_process_manager(
    session: &mut Session,
    context: &StepContext<'_>,
) -> StagehandResult<()> {
    let service = context.project.service(PROCESS_MANAGER)?;
    let unit = join_remote_path(&service.config_directory, GUNICORN_UNIT);

    remove(session, &unit)?;
    copy(session, &service.config_src, &unit)?;

    let profile = join_remote_path(&context.environment.home_directory(), ".bash_profile");
    let export = format!(
        "export DJANGO_SETTINGS_MODULE='{}'",
        context.environment.settings().settings_module
    );
    append_line(session, &profile, &export)?;

    systemctl(session, "start", "gunicorn")?;
    systemctl(session, "enable", "gunicorn")
}

pub(super) fn deploy_firewall(session: &mut Session, context: &StepContext<'_>) -> StagehandResult<()> {
    let firewall = &context.project.firewall;
    let append_input = || ShellCommand::new("iptables").literal("-A").arg("INPUT");

    systemctl(session, "stop", "fail2ban")?;
    session.run_privileged(&ShellCommand::new("netfilter-persistent").arg("flush"), None)?;

    let mut rules = vec![
        append_input().literal("-i").arg("lo").literal("-j").arg("ACCEPT"),
        append_input()
            .literal("-m")
            .arg("conntrack")
            .literal("--ctstate")
            .arg("ESTABLISHED,RELATED")
            .literal("-j")
            .arg("ACCEPT"),
        append_input()
            .literal("-p")
            .arg("tcp")
            .literal("--dport")
            .arg(firewall.ssh_port.to_string())
            .literal("-j")
            .arg("ACCEPT"),
    ];
    if !firewall.open_ports.is_empty() {
        let ports = firewall
            .open_ports
            .iter()
            .map(u16::to_string)
            .collect::<Vec<_>>()
            .join(",");
        rules.push(
            append_input()
                .literal("-p")
                .arg("tcp")
                .literal("-m")
                .arg("multiport")
                .literal("--dports")
                .arg(ports)
                .literal("-j")
                .arg("ACCEPT"),
        );
    }
    rules.push(append_input().literal("-j").arg("DROP"));

    for rule in &rules {
        session.run_privileged(rule, None)?;
    }

    session.run_privileged(
        &ShellCommand::new("dpkg-reconfigure").arg("iptables-persistent"),
        None,
    )?;
    systemctl(session, "start", "fail2ban")
}

pub(super) fn start_services(session: &mut Session, _context: &StepContext<'_>) -> StagehandResult<()> {
    systemctl(session, "start", "fail2ban")?;
    systemctl(session, "start", "gunicorn")?;
    systemctl(session, "start", "nginx")
}

pub(super) fn stop_services(session: &mut Session, _context: &StepContext<'_>) -> StagehandResult<()> {
    systemctl(session, "stop", "nginx")?;
    systemctl(session, "stop", "gunicorn")?;
    systemctl(session, "stop", "fail2ban")
}

pub(super) fn restart_services(session: &mut Session, _context: &StepContext<'_>) -> StagehandResult<()> {
    systemctl(session, "restart", "gunicorn")?;
    systemctl(session, "restart", "nginx")?;
    systemctl(session, "stop", "fail2ban")?;
    systemctl(session, "start", "fail2ban")
}
