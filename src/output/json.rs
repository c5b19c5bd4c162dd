use serde::Serialize;

pub fn write_pretty<T: Serialize + ?Sized>(value: &T, w: &mut dyn std::io::Write) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    writeln!(w, "{}", json)?;
    Ok(())
}
