//! CDS501 column layout per record kind.
//!
//! Position 0 of every kind is the record-type discriminator. The remaining
//! positions follow the extract's published column order for that kind.

use super::{FieldDef, RecordKind, RecordSchema};

const fn txt(name: &'static str) -> FieldDef {
    FieldDef::text(name)
}

const fn int(name: &'static str) -> FieldDef {
    FieldDef::integer(name)
}

const fn flag(name: &'static str) -> FieldDef {
    FieldDef::flag(name)
}

const fn dec(name: &'static str, precision: u8, scale: u8) -> FieldDef {
    FieldDef::decimal(name, precision, scale)
}

/// Record-type discriminator shared by all kinds (`1`, `2` or `3`).
pub const REC_TYP_CD: FieldDef = txt("rec_typ_cd").required();

const CRASH_FIELDS: [FieldDef; 97] = [
    REC_TYP_CD,
    int("crash_id").required(),
    txt("ser_no"),
    txt("crash_mo_no"),
    txt("crash_day_no"),
    txt("crash_yr_no"),
    txt("crash_wk_day_cd"),
    txt("crash_hr_no"),
    txt("cnty_id"),
    int("city_sect_id"),
    int("urb_area_cd"),
    txt("fc_cd"),
    flag("nhs_flg"),
    txt("hwy_no"),
    txt("hwy_sfx_no"),
    txt("rdwy_no"),
    txt("hwy_compnt_cd"),
    txt("mlge_typ_cd"),
    txt("rd_con_no"),
    txt("lrs_val"),
    int("lat_deg_no"),
    int("lat_minute_no"),
    dec("lat_sec_no", 5, 2),
    int("longtd_deg_no"),
    int("longtd_minute_no"),
    dec("longtd_sec_no", 5, 2),
    txt("specl_jrsdct_id"),
    txt("jrsdct_grp_cd"),
    txt("agy_st_no"),
    txt("isect_agy_st_no"),
    int("isect_seq_no"),
    int("from_isect_dstnc_qty"),
    txt("cmpss_dir_cd"),
    dec("mp_no", 5, 2),
    txt("post_speed_lmt_val"),
    txt("rd_char_cd"),
    flag("off_rdwy_flg"),
    txt("isect_typ_cd"),
    flag("isect_rel_flg"),
    flag("rndabt_flg"),
    flag("drvwy_rel_flg"),
    int("ln_qty"),
    int("turng_leg_qty"),
    txt("medn_typ_cd"),
    txt("impct_loc_cd"),
    txt("crash_typ_cd"),
    txt("collis_typ_cd"),
    txt("crash_svrty_cd"),
    txt("wthr_cond_cd"),
    txt("rd_surf_cond_cd"),
    txt("lgt_cond_cd"),
    txt("traf_cntl_device_cd"),
    flag("traf_cntl_func_flg"),
    txt("invstg_agy_cd"),
    txt("crash_evnt_1_cd"),
    txt("crash_evnt_2_cd"),
    txt("crash_evnt_3_cd"),
    txt("crash_cause_1_cd"),
    txt("crash_cause_2_cd"),
    txt("crash_cause_3_cd"),
    txt("schl_zone_ind"),
    txt("wrk_zone_ind"),
    flag("alchl_invlv_flg"),
    flag("drug_invlv_flg"),
    flag("crash_speed_invlv_flg"),
    flag("crash_hit_run_flg"),
    txt("pop_rng_cd"),
    txt("rd_cntl_cd"),
    txt("rte_typ_cd"),
    txt("rte_id"),
    txt("reg_id"),
    txt("dist_id"),
    txt("seg_mrk_id"),
    dec("seg_pt_lrs_meas", 9, 2),
    flag("unloct_flg"),
    int("tot_vhcl_cnt"),
    int("tot_fatal_cnt"),
    int("tot_inj_lvl_a_cnt"),
    int("tot_inj_lvl_b_cnt"),
    int("tot_inj_lvl_c_cnt"),
    int("tot_inj_cnt"),
    int("tot_uninjd_age00_04_cnt"),
    int("tot_uninjd_per_cnt"),
    int("tot_ped_cnt"),
    int("tot_ped_fatal_cnt"),
    int("tot_ped_inj_cnt"),
    int("tot_pedcycl_cnt"),
    int("tot_pedcycl_fatal_cnt"),
    int("tot_pedcycl_inj_cnt"),
    int("tot_unknwn_cnt"),
    int("tot_unknwn_fatal_cnt"),
    int("tot_unknwn_inj_cnt"),
    int("tot_occup_cnt"),
    int("tot_per_invlv_cnt"),
    int("tot_sfty_equip_used_qty"),
    int("tot_sfty_equip_unused_qty"),
    int("tot_sfty_equip_use_unknown_qty"),
];

const VEHICLE_FIELDS: [FieldDef; 26] = [
    REC_TYP_CD,
    int("crash_id").required(),
    int("vhcl_id").required(),
    int("vhcl_coded_seq_no"),
    txt("vhcl_ownshp_cd"),
    txt("vhcl_use_cd"),
    txt("vhcl_typ_cd"),
    flag("emrgcy_vhcl_use_flg"),
    int("trlr_qty"),
    txt("vhcl_mvmnt_cd"),
    txt("cmpss_dir_from_cd"),
    txt("cmpss_dir_to_cd"),
    txt("actn_cd"),
    txt("vhcl_cause_1_cd"),
    txt("vhcl_cause_2_cd"),
    txt("vhcl_cause_3_cd"),
    txt("vhcl_evnt_1_cd"),
    txt("vhcl_evnt_2_cd"),
    txt("vhcl_evnt_3_cd"),
    flag("vhcl_speed_flg"),
    flag("vhcl_hit_run_flg"),
    int("vhcl_sfty_equip_used_qty"),
    int("vhcl_sfty_equip_unused_qty"),
    int("vhcl_sfty_equip_use_unknwn_qty"),
    int("vhcl_occup_cnt"),
    flag("strikg_vhcl_flg"),
];

const PARTICIPANT_FIELDS: [FieldDef; 35] = [
    REC_TYP_CD,
    int("crash_id").required(),
    // Null or 0 for pedestrians, pedalcyclists and other non-motorists.
    int("vhcl_id"),
    int("partic_id").required(),
    int("partic_dsply_seq_no"),
    int("vhcl_coded_seq_no"),
    int("partic_vhcl_seq_no"),
    txt("partic_typ_cd"),
    flag("partic_hit_run_flg"),
    flag("pub_empl_flg"),
    txt("sex_cd"),
    txt("age_val"),
    txt("drvr_lic_stat_cd"),
    txt("drvr_res_stat_cd"),
    txt("inj_svrty_cd"),
    txt("sfty_equip_use_cd"),
    txt("airbag_deploy_ind"),
    txt("mvmnt_cd"),
    txt("cmpss_dir_from_cd"),
    txt("cmpss_dir_to_cd"),
    txt("non_motrst_loc_cd"),
    txt("actn_cd"),
    txt("partic_err_1_cd"),
    txt("partic_err_2_cd"),
    txt("partic_err_3_cd"),
    txt("partic_cause_1_cd"),
    txt("partic_cause_2_cd"),
    txt("partic_cause_3_cd"),
    txt("partic_evnt_1_cd"),
    txt("partic_evnt_2_cd"),
    txt("partic_evnt_3_cd"),
    txt("bac_val"),
    txt("alchl_use_rpt_ind"),
    txt("drug_use_rpt_ind"),
    flag("strikg_partic_flg"),
];

pub static CRASH: RecordSchema = RecordSchema::new(RecordKind::Crash, &CRASH_FIELDS);
pub static VEHICLE: RecordSchema = RecordSchema::new(RecordKind::Vehicle, &VEHICLE_FIELDS);
pub static PARTICIPANT: RecordSchema =
    RecordSchema::new(RecordKind::Participant, &PARTICIPANT_FIELDS);

pub fn schema_for(kind: RecordKind) -> &'static RecordSchema {
    match kind {
        RecordKind::Crash => &CRASH,
        RecordKind::Vehicle => &VEHICLE,
        RecordKind::Participant => &PARTICIPANT,
    }
}

pub fn fields_for(kind: RecordKind) -> &'static [FieldDef] {
    schema_for(kind).fields()
}

/// Record kinds whose field list contains `name`, in discriminator order.
pub fn kinds_with_field(name: &str) -> Vec<RecordKind> {
    RecordKind::ALL
        .into_iter()
        .filter(|kind| schema_for(*kind).position(name).is_some())
        .collect()
}
