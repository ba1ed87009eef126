use super::*;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(deny_unknown_fields, default)]
pub struct PlotConfig {
    pub files: Vec<PathBuf>,
    pub output: PathBuf,
    pub width: u32,
    pub height: u32,
    pub range_mode: RangeMode,
    pub line_color: ColorRgb,
    pub point_radius: u32,
}

impl PlotConfig {
    pub fn validate(&self) -> Result<()> {
        ensure!(!self.files.is_empty(), "At least one input file is required");
        ensure!(
            self.width > 0 && self.height > 0,
            "Figure size must be non-zero, got {}x{} instead",
            self.width,
            self.height
        );
        Ok(())
    }
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            files: vec![
                PathBuf::from("sample_front_back.txt"),
                PathBuf::from("sample_up_down.txt"),
            ],
            output: PathBuf::from("acceleration.svg"),
            width: 1280,
            height: 640,
            range_mode: RangeMode::Observed,
            line_color: ColorRgb::RED,
            point_radius: 3,
        }
    }
}

pub fn read_from_file<P, T>(path: P) -> Result<T>
where
    P: AsRef<Path>,
    T: DeserializeOwned,
{
    let path = path.as_ref();
    let file =
        File::open(path).with_context(|| format!("Failed to open config {}", path.display()))?;
    from_reader(BufReader::new(file))
}

pub fn from_reader<R, T>(reader: R) -> Result<T>
where
    R: std::io::Read,
    T: DeserializeOwned,
{
    Ok(ron::de::from_reader(reader)?)
}

pub fn write_to_file<P, T>(path: P, value: &T) -> Result<()>
where
    P: AsRef<Path>,
    T: Serialize,
{
    to_writer(BufWriter::new(File::create(path)?), value)
}

pub fn to_writer<W, T>(writer: W, value: &T) -> Result<()>
where
    W: std::io::Write,
    T: Serialize,
{
    let ron_config = ron::ser::PrettyConfig::default();
    ron::ser::to_writer_pretty(writer, &value, ron_config)?;
    Ok(())
}
