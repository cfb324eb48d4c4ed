//! Joint comparison table

/// Column names of the joint table, in output order
pub const TABLE_COLUMNS: [&str; 10] = [
    "chr1", "start1", "end1", "chr2", "start2", "end2", "IF1", "IF2", "D", "M",
];

/// One aligned bin pair with its derived metrics
///
/// Both bins lie on the chromosome of the owning [`HicTable`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JointRecord {
    pub start1: u64,
    pub end1: u64,
    pub start2: u64,
    pub end2: u64,
    /// Interaction frequency in the first dataset
    pub if1: f64,
    /// Interaction frequency in the second dataset, scaled if requested
    pub if2: f64,
    /// Distance between the bins in bin units
    pub d: f64,
    /// log2 ratio of IF2 over IF1
    pub m: f64,
}

/// Joint table for one chromosome
#[derive(Debug, Clone, PartialEq)]
pub struct HicTable {
    chrom: String,
    bin_size: u64,
    scale_factor: Option<f64>,
    records: Vec<JointRecord>,
}

impl HicTable {
    pub fn new(
        chrom: impl Into<String>,
        bin_size: u64,
        scale_factor: Option<f64>,
        records: Vec<JointRecord>,
    ) -> Self {
        Self {
            chrom: chrom.into(),
            bin_size,
            scale_factor,
            records,
        }
    }

    /// Same chromosome, bin size and scale factor with other records
    pub fn with_records(&self, records: Vec<JointRecord>) -> Self {
        Self {
            chrom: self.chrom.clone(),
            bin_size: self.bin_size,
            scale_factor: self.scale_factor,
            records,
        }
    }

    /// Chromosome shared by chr1 and chr2 of every record
    pub fn chrom(&self) -> &str {
        &self.chrom
    }

    pub fn bin_size(&self) -> u64 {
        self.bin_size
    }

    /// sum(IF2) / sum(IF1) used to rescale IF2, if scaling was applied
    pub fn scale_factor(&self) -> Option<f64> {
        self.scale_factor
    }

    pub fn records(&self) -> &[JointRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<JointRecord> {
        self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, JointRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Sorted distinct bin starts referenced by the table
    pub fn bin_starts(&self) -> Vec<u64> {
        let mut starts: Vec<u64> = self
            .records
            .iter()
            .flat_map(|r| [r.start1, r.start2])
            .collect();
        starts.sort_unstable();
        starts.dedup();
        starts
    }
}

impl<'a> IntoIterator for &'a HicTable {
    type Item = &'a JointRecord;
    type IntoIter = std::slice::Iter<'a, JointRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
