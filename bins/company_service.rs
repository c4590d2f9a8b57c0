mod launcher;

fn main() -> std::process::ExitCode {
    launcher::launch(configs::ServiceKind::Company)
}
