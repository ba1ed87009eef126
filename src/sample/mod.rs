use super::*;

mod range;

pub use range::{AxisRange, RangeMode, RangeTracker};

/// Prefix of every data bearing line.
pub const MARKER: &str = "acceleration -";

//
// Axis
//

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Self; 3] = [Self::X, Self::Y, Self::Z];

    pub const fn index(self) -> usize {
        match self {
            Self::X => 0,
            Self::Y => 1,
            Self::Z => 2,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::X => "x",
            Self::Y => "y",
            Self::Z => "z",
        }
    }

    /// Text preceding the number in this axis' field, including the space
    /// left behind by the comma split.
    pub const fn label(self) -> &'static str {
        match self {
            Self::X => " x: ",
            Self::Y => " y: ",
            Self::Z => " z: ",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

//
// Sample set
//

#[derive(Clone, Debug, PartialEq)]
pub struct SampleSet {
    name: String,
    values: [Vec<f64>; 3],
    trackers: [RangeTracker; 3],
}

impl SampleSet {
    pub fn new(name: impl Into<String>, mode: RangeMode) -> Self {
        Self {
            name: name.into(),
            values: [vec![], vec![], vec![]],
            trackers: [RangeTracker::new(mode); 3],
        }
    }

    pub fn read<P: AsRef<Path>>(path: P, mode: RangeMode) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let name = path.file_name().map_or_else(
            || path.display().to_string(),
            |name| name.to_string_lossy().into_owned(),
        );
        Self::parse(name, &text, mode)
    }

    pub fn parse(name: impl Into<String>, text: &str, mode: RangeMode) -> Result<Self> {
        Self::from_lines(name, text.lines(), mode)
    }

    pub fn from_lines<'a, I>(name: impl Into<String>, lines: I, mode: RangeMode) -> Result<Self>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut set = Self::new(name, mode);
        for (index, line) in lines.into_iter().enumerate() {
            let sample = parse_line(line)
                .with_context(|| format!("{}:{}: {line:?}", set.name, index + 1))?;
            if let Some(sample) = sample {
                set.push(sample);
            }
        }
        debug!(
            "Parsed {} samples from {} with {} ranges",
            set.len(),
            set.name,
            set.mode()
        );
        Ok(set)
    }

    pub fn push(&mut self, sample: [f64; 3]) {
        for axis in Axis::ALL {
            let value = sample[axis.index()];
            self.values[axis.index()].push(value);
            self.trackers[axis.index()].add(value);
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mode(&self) -> RangeMode {
        self.trackers[0].mode()
    }

    pub fn len(&self) -> usize {
        self.values[0].len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn values(&self, axis: Axis) -> &[f64] {
        &self.values[axis.index()]
    }

    pub fn range(&self, axis: Axis) -> Option<AxisRange> {
        self.trackers[axis.index()].range()
    }

    pub fn points(&self) -> impl Iterator<Item = na::Point3<f64>> + '_ {
        let [x, y, z] = &self.values;
        x.iter()
            .zip(y)
            .zip(z)
            .map(|((&x, &y), &z)| na::Point3::new(x, y, z))
    }
}

impl fmt::Display for SampleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, axis) in Axis::ALL.into_iter().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }
            match self.range(axis) {
                Some(range) => write!(f, "{axis} in {range}")?,
                None => write!(f, "{axis} in [unset]")?,
            }
        }
        Ok(())
    }
}

//
// Parsing
//

fn parse_line(line: &str) -> Result<Option<[f64; 3]>> {
    let Some(fields) = line.strip_prefix(MARKER) else {
        return Ok(None);
    };
    let fields = fields.split(',').collect::<Vec<_>>();
    ensure!(
        fields.len() == 3,
        "Expected 3 comma separated fields, got {} instead",
        fields.len()
    );

    let mut sample = [0.0; 3];
    for (axis, field) in Axis::ALL.into_iter().zip(fields) {
        sample[axis.index()] = parse_field(axis, field)?;
    }
    Ok(Some(sample))
}

fn parse_field(axis: Axis, field: &str) -> Result<f64> {
    let label = axis.label();
    let number = field
        .strip_prefix(label)
        .ok_or_else(|| anyhow!("Expected {axis} field to start with {label:?}, got {field:?}"))?;
    number
        .trim()
        .parse::<f64>()
        .with_context(|| format!("Invalid {axis} value {number:?}"))
}

//
// Runner
//

#[derive(clap::Args)]
pub struct Args {
    /// Acceleration logs to summarize.
    #[arg(required = true)]
    files: Vec<PathBuf>,

    #[arg(long, value_enum, default_value_t = RangeMode::Observed)]
    range_mode: RangeMode,
}

pub fn run(args: Args) -> Result<()> {
    for file in args.files {
        let set = SampleSet::read(&file, args.range_mode)?;
        println!("{}", summary_line(&set));
    }
    Ok(())
}

/// One line per file: name, sample count, then the tracked ranges.
pub fn summary_line(set: &SampleSet) -> String {
    format!("{}: {} samples, {set}", set.name(), set.len())
}

//
// Tests
//

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_ulps_eq;

    const LOG: &str = "\
session start
acceleration - x: 1.0, y: 2.0, z: 3.0
gyro - x: 9.0, y: 9.0, z: 9.0
acceleration - x: -1.0, y: 5.0, z: 0.5
";

    #[test]
    fn parses_marker_lines() {
        let set = SampleSet::parse("log.txt", LOG, RangeMode::Observed).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.values(Axis::X), [1.0, -1.0]);
        assert_eq!(set.values(Axis::Y), [2.0, 5.0]);
        assert_eq!(set.values(Axis::Z), [3.0, 0.5]);
        assert_eq!(set.range(Axis::X), Some(AxisRange::new(-1.0, 1.0)));
        assert_eq!(set.range(Axis::Y), Some(AxisRange::new(2.0, 5.0)));
        assert_eq!(set.range(Axis::Z), Some(AxisRange::new(0.5, 3.0)));
    }

    #[test]
    fn legacy_ranges() {
        let set = SampleSet::parse("log.txt", LOG, RangeMode::Legacy).unwrap();
        assert_eq!(set.mode(), RangeMode::Legacy);
        assert_eq!(set.values(Axis::Y), [2.0, 5.0]);
        assert_eq!(set.range(Axis::X), Some(AxisRange::new(-1.0, 1.0)));
        assert_eq!(set.range(Axis::Y), Some(AxisRange::new(1.0, 5.0)));
        assert_eq!(set.range(Axis::Z), Some(AxisRange::new(0.5, 3.0)));
    }

    #[test]
    fn sequences_match_marker_count() {
        let text = (0..50)
            .map(|i| {
                if i % 3 == 0 {
                    format!("noise {i}")
                } else {
                    format!("acceleration - x: {i}, y: {}, z: {}", -i, i * 2)
                }
            })
            .collect::<Vec<_>>()
            .join("\n");
        let markers = text.lines().filter(|line| line.starts_with(MARKER)).count();
        let set = SampleSet::parse("log.txt", &text, RangeMode::Observed).unwrap();
        assert_eq!(set.len(), markers);
        for axis in Axis::ALL {
            assert_eq!(set.values(axis).len(), markers);
        }
        assert_eq!(set.points().count(), markers);
    }

    #[test]
    fn single_zero() {
        for mode in [RangeMode::Observed, RangeMode::Legacy] {
            let set =
                SampleSet::from_lines("log.txt", ["acceleration - x: 0.0, y: 1.5, z: -2.0"], mode)
                    .unwrap();
            assert_eq!(set.range(Axis::X), Some(AxisRange::new(0.0, 0.0)));
        }
    }

    #[test]
    fn ignores_other_lines() {
        let lines = [
            "Acceleration - x: 100.0, y: 100.0, z: 100.0",
            " acceleration - x: 100.0, y: 100.0, z: 100.0",
            "acceleration - x: 1.0, y: 1.0, z: 1.0",
            "",
        ];
        let set = SampleSet::from_lines("log.txt", lines, RangeMode::Observed).unwrap();
        assert_eq!(set.len(), 1);
        for axis in Axis::ALL {
            assert_eq!(set.range(axis), Some(AxisRange::new(1.0, 1.0)));
        }
    }

    #[test]
    fn empty_input() {
        let set = SampleSet::parse("empty.txt", "", RangeMode::Observed).unwrap();
        assert!(set.is_empty());
        assert_eq!(set.range(Axis::Z), None);
        assert_eq!(set.to_string(), "x in [unset], y in [unset], z in [unset]");
    }

    #[test]
    fn fail_two_fields() {
        let err = SampleSet::from_lines(
            "log.txt",
            ["acceleration - x: 1.0, y: 2.0"],
            RangeMode::Observed,
        )
        .unwrap_err();
        assert!(format!("{err:#}").contains("Expected 3 comma separated fields, got 2 instead"));
        assert!(err.to_string().starts_with("log.txt:1"));
    }

    #[test]
    fn fail_four_fields() {
        let result = SampleSet::from_lines(
            "log.txt",
            ["acceleration - x: 1.0, y: 2.0, z: 3.0, w: 4.0"],
            RangeMode::Observed,
        );
        assert!(result.is_err());
    }

    #[test]
    fn fail_non_numeric() {
        let err = SampleSet::from_lines(
            "log.txt",
            ["", "acceleration - x: 1.0, y: abc, z: 3.0"],
            RangeMode::Observed,
        )
        .unwrap_err();
        let message = format!("{err:#}");
        assert!(message.starts_with("log.txt:2"));
        assert!(message.contains("Invalid y value"));
        assert!(err.root_cause().is::<std::num::ParseFloatError>());
    }

    #[test]
    fn fail_axis_out_of_order() {
        let err = SampleSet::from_lines(
            "log.txt",
            ["acceleration - y: 1.0, x: 2.0, z: 3.0"],
            RangeMode::Observed,
        )
        .unwrap_err();
        assert!(format!("{err:#}").contains("Expected x field to start with"));
    }

    #[test]
    fn trailing_whitespace() {
        let set = SampleSet::parse(
            "log.txt",
            "acceleration - x: 0.25, y: -0.5, z: 9.81  \r\n",
            RangeMode::Observed,
        )
        .unwrap();
        assert_ulps_eq!(set.values(Axis::Z)[0], 9.81, max_ulps = 1);
    }

    #[test]
    fn idempotent() {
        let a = SampleSet::parse("log.txt", LOG, RangeMode::Legacy).unwrap();
        let b = SampleSet::parse("log.txt", LOG, RangeMode::Legacy).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn read_missing_file() {
        let path = std::env::temp_dir().join("accelview-does-not-exist.txt");
        let err = SampleSet::read(&path, RangeMode::Observed).unwrap_err();
        assert!(err.to_string().starts_with("Failed to read"));
    }

    #[test]
    fn read_file() {
        let path = std::env::temp_dir().join(format!("accelview-read-{}.txt", std::process::id()));
        std::fs::write(&path, LOG).unwrap();
        let set = SampleSet::read(&path, RangeMode::Observed).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(set.name(), path.file_name().unwrap().to_string_lossy());
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn display() {
        let set = SampleSet::parse("log.txt", LOG, RangeMode::Observed).unwrap();
        assert_eq!(set.to_string(), "x in [-1, 1], y in [2, 5], z in [0.5, 3]");
    }

    #[test]
    fn summary_line_per_mode() {
        let set = SampleSet::parse("log.txt", LOG, RangeMode::Observed).unwrap();
        assert_eq!(
            summary_line(&set),
            "log.txt: 2 samples, x in [-1, 1], y in [2, 5], z in [0.5, 3]"
        );
        let set = SampleSet::parse("log.txt", LOG, RangeMode::Legacy).unwrap();
        assert_eq!(
            summary_line(&set),
            "log.txt: 2 samples, x in [-1, 1], y in [1, 5], z in [0.5, 3]"
        );
        let set = SampleSet::parse("empty.txt", "", RangeMode::Observed).unwrap();
        assert_eq!(
            summary_line(&set),
            "empty.txt: 0 samples, x in [unset], y in [unset], z in [unset]"
        );
    }

    #[test]
    fn run_summary() {
        let path = std::env::temp_dir().join(format!("accelview-summary-{}.txt", std::process::id()));
        std::fs::write(&path, LOG).unwrap();
        let result = run(Args {
            files: vec![path.clone()],
            range_mode: RangeMode::Legacy,
        });
        std::fs::remove_file(&path).unwrap();
        result.unwrap();

        let missing = std::env::temp_dir().join("accelview-summary-missing.txt");
        assert!(run(Args {
            files: vec![missing],
            range_mode: RangeMode::Observed,
        })
        .is_err());
    }
}
