use std::{collections::HashMap, path::{Path, PathBuf}};

use lazy_static::lazy_static;

lazy_static! {
    ///
    /// Studies keyed by PI last name. Scans are categorized on the MR
    /// server by PI last name.
    ///
    static ref PI_STUDIES: HashMap<&'static str, Vec<&'static str>> = HashMap::from([
        ("cosgrove", vec!["bava_ptsd_aud", "fmozat_dex", "mukappa_aud", "pbr_app311_aud", "pbr_oud"]),
        ("davis", vec!["ekap_ptsd", "fpeb_bpd", "pbr_ed"]),
        ("esterlis", vec!["app311_fpeb", "app311_ket", "fpeb_abp_mdd", "sdm8_sdc", "sv2a_aging_mdd"]),
        ("zakiniaeiz", vec!["flb_aud"]),
    ]);
}

///
/// Looks up the PI associated with the given study. A trailing `_mr`
/// suffix is ignored for the lookup.
///
pub fn pi_for_study(study: &str) -> Option<&'static str> {
    let study = study.strip_suffix("_mr").unwrap_or(study);
    PI_STUDIES.iter()
        .find(|(_, studies)| studies.contains(&study))
        .map(|(pi, _)| *pi)
}

///
/// Study directories on the PET side always carry the `_mr` suffix
///
pub fn normalize_study(study: &str) -> String {
    if study.ends_with("_mr") {
        study.to_string()
    } else {
        format!("{}_mr", study)
    }
}

///
/// Extracts the scan date from a scan directory name. Scan directories
/// on the MR server are named `<scanner>_<date>_<id>`.
///
pub fn mr_date_from_scan(scan: &str) -> Option<&str> {
    let mut parts = scan.split('_');
    parts.next()?;
    parts.next().filter(|date| !date.is_empty())
}

///
/// Builds the destination directory for a scan under the PET data tree:
/// `<dest_root>/<study>_mr/<mr_date>_<subject>/3d_dicom`
///
pub fn pet_scan_dir(dest_root: &Path, study: &str, scan: &str, subject: &str) -> Option<PathBuf> {
    let mr_date = mr_date_from_scan(scan)?;
    Some(dest_root
        .join(normalize_study(study))
        .join(format!("{}_{}", mr_date, subject))
        .join("3d_dicom"))
}
