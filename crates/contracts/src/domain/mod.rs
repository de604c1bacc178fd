pub mod a001_lab_order;
