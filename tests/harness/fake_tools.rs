use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

/// Config text the fake `oslo-config-generator` writes.
pub(crate) const GENERATED_CONFIG: &str = "\
[DEFAULT]
#debug = false

[database]
#connection = <None>

[oslo_messaging_rabbit]
#rabbit_host = localhost

[pecan]
#auth_enable = true
";

/// Shell stand-ins for the host tools, each appending one line per call to a log.
pub(crate) struct FakeTools {
    pub bin_dir: PathBuf,
    pub log_file: PathBuf,
}

impl FakeTools {
    pub(crate) fn install(root: &Path) -> Self {
        let bin_dir = root.join("bin");
        fs::create_dir_all(&bin_dir).expect("Failed to create fake bin dir");
        let log_file = root.join("tools.log");

        let tools = Self { bin_dir, log_file };
        for tool in ["apt-get", "pip", "python"] {
            tools.write_tool(tool, "exit 0");
        }
        tools.write_tool(
            "oslo-config-generator",
            &format!(
                r#"out=""
while [ $# -gt 0 ]; do
    if [ "$1" = "--output-file" ]; then out="$2"; shift; fi
    shift
done
cat > "$out" <<'CONF'
{}CONF"#,
                GENERATED_CONFIG
            ),
        );
        tools
    }

    /// Make `tool` log its call and exit with `code`.
    pub(crate) fn fail(&self, tool: &str, code: i32) {
        self.write_tool(tool, &format!("exit {}", code));
    }

    /// Make `tool` log its call and succeed without side effects.
    pub(crate) fn noop(&self, tool: &str) {
        self.write_tool(tool, "exit 0");
    }

    pub(crate) fn log(&self) -> String {
        fs::read_to_string(&self.log_file).unwrap_or_default()
    }

    pub(crate) fn log_lines(&self) -> Vec<String> {
        self.log().lines().map(str::to_string).collect()
    }

    fn write_tool(&self, name: &str, body: &str) {
        let path = self.bin_dir.join(name);
        let script = format!(
            "#!/bin/sh\necho \"{} [frontend=${{DEBIAN_FRONTEND:-unset}}] $*\" >> \"{}\"\n{}\n",
            name,
            self.log_file.display(),
            body
        );
        fs::write(&path, script).expect("Failed to write fake tool");

        let mut perms = fs::metadata(&path).expect("Failed to get metadata").permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&path, perms).expect("Failed to set permissions");
    }
}
