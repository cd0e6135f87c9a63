use crate::model::bucket::BucketScheme;

#[derive(Debug)]
pub struct Stage3Output {
    pub assignments: Vec<Option<usize>>,
    pub n_unassigned: usize,
}

pub fn run_stage3(scheme: &BucketScheme, composites: &[f64]) -> Stage3Output {
    let assignments: Vec<Option<usize>> = composites.iter().map(|&s| scheme.assign(s)).collect();
    let n_unassigned = assignments.iter().filter(|a| a.is_none()).count();
    Stage3Output {
        assignments,
        n_unassigned,
    }
}
