use anyhow::Result;

fn main() -> Result<()> {
    grammar_i18n_cli::main_entry()
}
